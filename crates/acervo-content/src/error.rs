//! Error types for the content client.

use thiserror::Error;

/// Result type for content operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading from the content store.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested record does not exist (or is not visible to us)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Content store returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response did not match the record schema
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error means "the record is not there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

//! Error types for listing state.

use thiserror::Error;

/// Result type for listing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A page fetch failed in the content layer
    #[error("Content error: {0}")]
    Content(#[from] acervo_content::Error),

    /// A page fetch failed elsewhere
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

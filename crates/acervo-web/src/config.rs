//! Start-up configuration from the environment.

use crate::error::{Error, Result};
use acervo_content::ClientConfig;
use std::net::SocketAddr;
use std::time::Duration;

/// Site configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Content store URL used by the server
    pub content_url: String,

    /// Content store URL used in asset links sent to browsers
    pub public_url: String,

    /// Optional static token for the content store
    pub token: Option<String>,

    /// HTTP listen address
    pub api_addr: SocketAddr,

    /// Per-request timeout towards the content store
    pub request_timeout: Duration,
}

const DEFAULT_CONTENT_URL: &str = "http://localhost:8055";
const DEFAULT_API_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            content_url: DEFAULT_CONTENT_URL.to_string(),
            public_url: DEFAULT_CONTENT_URL.to_string(),
            token: None,
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl WebConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let content_url = var("DIRECTUS_URL").unwrap_or_else(|| DEFAULT_CONTENT_URL.to_string());
        let public_url =
            var("DIRECTUS_PUBLIC_URL").unwrap_or_else(|| DEFAULT_CONTENT_URL.to_string());
        let token = var("DIRECTUS_STATIC_TOKEN");

        let api_addr = var("ACERVO_API_ADDR")
            .unwrap_or_else(|| DEFAULT_API_ADDR.to_string())
            .parse()
            .map_err(|e| Error::Config(format!("Invalid ACERVO_API_ADDR: {e}")))?;

        let request_timeout = match var("ACERVO_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    Error::Config(format!("Invalid ACERVO_REQUEST_TIMEOUT_SECS: {e}"))
                })?;
                if secs == 0 {
                    let message = "ACERVO_REQUEST_TIMEOUT_SECS must be positive";
                    return Err(Error::Config(message.into()));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { content_url, public_url, token, api_addr, request_timeout })
    }

    /// Settings for the content client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.content_url.clone(),
            token: self.token.clone(),
            timeout: self.request_timeout,
        }
    }
}

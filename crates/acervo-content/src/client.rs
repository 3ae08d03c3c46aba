//! HTTP client for the content store's item API.

use crate::error::{Error, Result};
use crate::query::{Filter, Query};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`ContentClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the store (`http://localhost:8055`)
    pub base_url: String,

    /// Optional static bearer token
    pub token: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8055".to_string(),
            token: None,
            timeout: Duration::from_secs(15),
        }
    }
}

/// The `{ "data": ..., "meta": ... }` envelope every item response uses.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    filter_count: Option<serde_json::Value>,
}

/// Counts come back as numbers or numeric strings depending on the database.
fn count_value(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read-only client for the content store.
///
/// Cheap to clone; constructed once at start-up and shared by handlers.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ContentClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config(format!("invalid content store URL: {:?}", config.base_url)));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str, params: &[(String, String)]) -> reqwest::RequestBuilder {
        let mut req = self.http.get(format!("{}{}", self.base_url, path)).query(params);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send and decode, mapping non-success statuses to errors.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Envelope<T>> {
        let resp = self.get(path, params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                403 | 404 => Error::NotFound(path.to_string()),
                code => Error::Status { status: code, message },
            });
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Read rows of `collection`.
    pub async fn read_items<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<T>> {
        let path = format!("/items/{collection}");
        let envelope: Envelope<Vec<T>> = self.fetch(&path, &query.to_params()).await?;
        debug!(collection, rows = envelope.data.len(), "read items");
        Ok(envelope.data)
    }

    /// Read rows together with the store's filtered row count.
    pub async fn read_items_counted<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<(Vec<T>, Option<u64>)> {
        let path = format!("/items/{collection}");
        let query = query.clone().with_filter_count();
        let envelope: Envelope<Vec<T>> = self.fetch(&path, &query.to_params()).await?;
        let count = envelope
            .meta
            .and_then(|m| m.filter_count)
            .as_ref()
            .and_then(count_value);
        Ok((envelope.data, count))
    }

    /// Read one row by primary key. Ids the store hides or lacks are [`Error::NotFound`].
    pub async fn read_item<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: impl Display,
        query: &Query,
    ) -> Result<T> {
        let path = format!("/items/{collection}/{id}");
        let envelope: Envelope<Option<T>> = self.fetch(&path, &query.to_params()).await?;
        envelope.data.ok_or(Error::NotFound(path))
    }

    /// Number of rows matching `filter`.
    ///
    /// Tries the `filter_count` meta first, then an aggregate count; when both
    /// are unusable the count is zero. Transport failures are returned.
    pub async fn count(&self, collection: &str, filter: Option<&Filter>) -> Result<u64> {
        let path = format!("/items/{collection}");
        let query = Query::new()
            .fields(["id"])
            .limit(0)
            .maybe_filter(filter.cloned())
            .with_filter_count();

        match self.fetch::<serde_json::Value>(&path, &query.to_params()).await {
            Ok(envelope) => {
                let reported = envelope.meta.and_then(|m| m.filter_count);
                if let Some(n) = reported.as_ref().and_then(count_value) {
                    return Ok(n);
                }
            }
            Err(Error::Http(e)) => return Err(Error::Http(e)),
            Err(e) => warn!(collection, error = %e, "filter_count unavailable, trying aggregate"),
        }

        let mut params = vec![("aggregate[count]".to_string(), "*".to_string())];
        if let Some(filter) = filter {
            params.push(("filter".to_string(), filter.to_value().to_string()));
        }
        match self.fetch::<Vec<serde_json::Value>>(&path, &params).await {
            Ok(envelope) => Ok(envelope
                .data
                .first()
                .and_then(|row| row.get("count"))
                .and_then(count_value)
                .unwrap_or(0)),
            Err(Error::Http(e)) => Err(Error::Http(e)),
            Err(e) => {
                warn!(collection, error = %e, "aggregate count failed, reporting zero");
                Ok(0)
            }
        }
    }
}

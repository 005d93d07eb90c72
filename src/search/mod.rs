//! Client for the torrent index's JSON search API.

pub mod format;
mod types;

pub use format::{format_bytes, format_date, magnet_uri, to_choice};
pub use types::SearchResult;

use crate::config::Config;
use crate::error::{Error, QueryError, Result};
use std::time::Duration;

/// Trim a raw query and check it against the length limit.
pub fn validate_query(raw: &str, max_len: usize) -> std::result::Result<String, QueryError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(QueryError::Empty);
    }
    if query.chars().count() > max_len {
        return Err(QueryError::TooLong { max: max_len });
    }
    Ok(query.to_string())
}

/// Decode a response body, treating the placeholder record as "no results".
pub fn parse_results(body: &[u8]) -> Result<Vec<SearchResult>> {
    let results: Vec<SearchResult> =
        serde_json::from_slice(body).map_err(Error::InvalidResponse)?;
    match results.first() {
        Some(first) if first.is_placeholder() => Ok(Vec::new()),
        _ => Ok(results),
    }
}

pub struct IndexClient {
    client: reqwest::Client,
    base_url: String,
}

impl IndexClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    /// Search the index. An empty vector means nothing matched.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        tracing::debug!(query, base_url = %self.base_url, "searching index");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "index returned an error status");
            return Err(Error::Api { status });
        }

        let body = response.bytes().await?;
        let results = parse_results(&body)?;
        tracing::debug!(count = results.len(), "search finished");
        Ok(results)
    }
}

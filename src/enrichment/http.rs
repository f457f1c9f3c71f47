//! Shared HTTP client for the scraped sources.
//!
//! One `reqwest::Client` is built per aggregator and cloned into each
//! source client (clones share the connection pool). Every request carries
//! the configured timeout; a timeout surfaces as [`MetadataError::Timeout`]
//! so the fetch report can tell it apart from other failures.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::HttpConfig;
use crate::enrichment::domain::MetadataError;

/// Thin wrapper around `reqwest::Client` that maps failures to [`MetadataError`].
#[derive(Debug, Clone)]
pub struct PageClient {
    http_client: reqwest::Client,
}

impl PageClient {
    /// Build a client from HTTP settings.
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send the configured User-Agent (some sites reject empty agents)
    /// - Give up on any request after `timeout_secs`
    pub fn new(settings: &HttpConfig) -> Result<Self, MetadataError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .map_err(|e| MetadataError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// GET a page and return its body as text. Non-2xx is an error.
    pub async fn get_text(&self, url: &str) -> Result<String, MetadataError> {
        let response = self.send(url).await?;
        response.text().await.map_err(|e| map_transport(url, e))
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MetadataError> {
        let response = self.send(url).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| MetadataError::Parse(e.to_string()))
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, MetadataError> {
        tracing::debug!(url, "GET");
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

fn map_transport(url: &str, err: reqwest::Error) -> MetadataError {
    if err.is_timeout() {
        MetadataError::Timeout(url.to_string())
    } else {
        MetadataError::Network(err.to_string())
    }
}

/// Join a configured base URL and a path without doubling slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

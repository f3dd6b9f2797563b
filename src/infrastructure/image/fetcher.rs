//! HTTP adapter for the image fetcher port.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::ImageFetcherPort;

/// Default request timeout in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Downloads images with a single GET per request.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher whose requests time out after `timeout`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> CacheResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("webcache/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CacheError::Network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { http_client })
    }

    /// Creates a fetcher with the default timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_defaults() -> CacheResult<Self> {
        Self::new(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> CacheResult<Bytes> {
        debug!(url = %url, "Downloading image from network");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CacheError::Network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CacheError::Network(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| CacheError::Network(format!("Failed to read body: {e}")))
    }
}

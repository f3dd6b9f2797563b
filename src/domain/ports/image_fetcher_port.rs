//! Port definition for fetching remote images.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::CacheResult;

/// Port for downloading image bytes.
///
/// Performs a single GET with no retry. The cache never calls this itself;
/// the load flow does, and hands the bytes to the coordinator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Fetches the body at `url`.
    async fn fetch(&self, url: &str) -> CacheResult<Bytes>;
}

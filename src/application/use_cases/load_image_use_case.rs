//! Load image use case implementation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::services::CacheCoordinator;
use crate::domain::entities::{ImageSource, LoadedImage};
use crate::domain::errors::CacheResult;
use crate::domain::ports::ImageFetcherPort;
use crate::infrastructure::image::ImageCodec;

/// Message sent when a background load finishes.
#[derive(Debug, Clone)]
pub struct ImageLoadedEvent {
    /// The requested URL.
    pub url: String,
    /// The loaded image, or the failure reason.
    pub result: Result<LoadedImage, String>,
}

/// Serves an image from the cache, falling back to the network.
#[derive(Clone)]
pub struct LoadImageUseCase {
    cache: Arc<CacheCoordinator>,
    fetcher: Arc<dyn ImageFetcherPort>,
}

impl LoadImageUseCase {
    /// Creates new load image use case.
    #[must_use]
    pub const fn new(cache: Arc<CacheCoordinator>, fetcher: Arc<dyn ImageFetcherPort>) -> Self {
        Self { cache, fetcher }
    }

    /// Loads `url` from the disk cache, or downloads and caches it.
    ///
    /// A download that cannot be cached is still returned.
    ///
    /// # Errors
    /// Returns error if the download fails or the body is not an image.
    pub async fn execute(&self, url: &str) -> CacheResult<LoadedImage> {
        if let Some(hit) = self.cache.lookup(url).await {
            return Ok(LoadedImage {
                url: url.to_string(),
                image: hit.image,
                source: ImageSource::DiskCache,
            });
        }

        let bytes = self.fetcher.fetch(url).await.map_err(|e| {
            warn!(url = %url, error = %e, "Image download failed");
            e
        })?;

        let image = ImageCodec::decode_blocking(bytes.to_vec()).await.map_err(|e| {
            warn!(url = %url, error = %e, "Downloaded resource is not displayable");
            e
        })?;
        let image = Arc::new(image);

        match self.cache.store_image(url, image.clone()).await {
            Ok(record) => debug!(url = %url, file = %record.file_name(), "Cached downloaded image"),
            Err(e) => warn!(url = %url, error = %e, "Could not cache downloaded image"),
        }

        Ok(LoadedImage {
            url: url.to_string(),
            image,
            source: ImageSource::Network,
        })
    }

    /// Runs [`Self::execute`] on a background task.
    /// The result is delivered on `event_tx`.
    pub fn spawn(
        &self,
        url: String,
        event_tx: &mpsc::UnboundedSender<ImageLoadedEvent>,
    ) -> JoinHandle<()> {
        let use_case = self.clone();
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute(&url).await.map_err(|e| e.to_string());
            let event = ImageLoadedEvent { url, result };
            if event_tx.send(event).is_err() {
                debug!("Image event receiver dropped");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CacheError;
    use crate::domain::ports::mocks::{ManualClock, MockBlobStore, MockImageFetcherPort, MockLedger};
    use crate::domain::services::ExpiryPolicy;
    use crate::infrastructure::image::codec::test_support::png_bytes;
    use bytes::Bytes;
    use chrono::Utc;

    const URL: &str = "https://x/a.png";

    fn make_cache(blobs: Arc<MockBlobStore>) -> Arc<CacheCoordinator> {
        Arc::new(CacheCoordinator::new(
            blobs,
            Arc::new(MockLedger::new()),
            Arc::new(ManualClock::new(Utc::now())),
            ExpiryPolicy::default(),
            ImageCodec::default(),
        ))
    }

    fn fetcher_returning(bytes: Vec<u8>, times: usize) -> MockImageFetcherPort {
        let mut fetcher = MockImageFetcherPort::new();
        fetcher
            .expect_fetch()
            .withf(|url| url == URL)
            .times(times)
            .returning(move |_| Ok(Bytes::from(bytes.clone())));
        fetcher
    }

    #[tokio::test]
    async fn test_first_load_downloads_then_hits_disk() {
        let cache = make_cache(Arc::new(MockBlobStore::new()));
        let use_case = LoadImageUseCase::new(cache.clone(), Arc::new(fetcher_returning(png_bytes(30, 20), 1)));

        let first = use_case.execute(URL).await.unwrap();
        assert_eq!(first.source, ImageSource::Network);
        assert_eq!((first.width(), first.height()), (30, 20));

        let second = use_case.execute(URL).await.unwrap();
        assert_eq!(second.source, ImageSource::DiskCache);
        assert_eq!((second.width(), second.height()), (30, 20));
        assert_eq!(cache.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_download_failure_is_returned_and_nothing_cached() {
        let cache = make_cache(Arc::new(MockBlobStore::new()));
        let mut fetcher = MockImageFetcherPort::new();
        fetcher
            .expect_fetch()
            .returning(|_| Err(CacheError::Network("HTTP 404 Not Found: Not Found".into())));
        let use_case = LoadImageUseCase::new(cache.clone(), Arc::new(fetcher));

        let result = use_case.execute(URL).await;

        assert!(matches!(result, Err(CacheError::Network(_))));
        assert!(cache.entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_undisplayable_download_is_rejected() {
        let cache = make_cache(Arc::new(MockBlobStore::new()));
        let use_case = LoadImageUseCase::new(
            cache.clone(),
            Arc::new(fetcher_returning(b"<html>oops</html>".to_vec(), 1)),
        );

        let result = use_case.execute(URL).await;

        assert!(matches!(result, Err(CacheError::DecodeFailed(_))));
        assert!(cache.entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_still_returns_image() {
        let blobs = Arc::new(MockBlobStore::new());
        blobs.set_fail_writes(true);
        let cache = make_cache(blobs);
        let use_case = LoadImageUseCase::new(cache.clone(), Arc::new(fetcher_returning(png_bytes(5, 5), 2)));

        let loaded = use_case.execute(URL).await.unwrap();
        assert_eq!(loaded.source, ImageSource::Network);

        let again = use_case.execute(URL).await.unwrap();
        assert_eq!(again.source, ImageSource::Network);
    }

    #[tokio::test]
    async fn test_spawn_delivers_event() {
        let cache = make_cache(Arc::new(MockBlobStore::new()));
        let use_case = LoadImageUseCase::new(cache, Arc::new(fetcher_returning(png_bytes(4, 9), 1)));
        let (tx, mut rx) = mpsc::unbounded_channel();

        use_case.spawn(URL.to_string(), &tx).await.unwrap();
        let event = rx.recv().await.unwrap();

        assert_eq!(event.url, URL);
        let loaded = event.result.unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 9));
    }
}

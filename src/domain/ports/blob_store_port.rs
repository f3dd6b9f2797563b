//! Port definition for blob persistence.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::CacheResult;

/// Port for reading and writing encoded image blobs by file name.
/// Implementations must be thread-safe.
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// Persists bytes under `file_name`, creating the store if needed.
    async fn write(&self, file_name: &str, bytes: &[u8]) -> CacheResult<()>;

    /// Returns the raw bytes, or None if the blob is missing or unreadable.
    async fn read_bytes(&self, file_name: &str) -> Option<Vec<u8>>;

    /// Returns the decoded image.
    /// Missing, unreadable and undecodable blobs all yield None.
    async fn read(&self, file_name: &str) -> Option<Arc<image::DynamicImage>>;

    /// Removes a blob. A blob that is already gone counts as removed.
    async fn delete(&self, file_name: &str) -> CacheResult<()>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    use crate::domain::errors::CacheError;

    /// In-memory blob store with switchable failures.
    #[derive(Default)]
    pub struct MockBlobStore {
        blobs: RwLock<HashMap<String, Vec<u8>>>,
        fail_writes: AtomicBool,
        undeletable: RwLock<HashSet<String>>,
    }

    impl MockBlobStore {
        /// Creates an empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every subsequent write fail.
        pub fn set_fail_writes(&self, value: bool) {
            self.fail_writes.store(value, Ordering::SeqCst);
        }

        /// Makes deletion of `file_name` fail.
        pub async fn make_undeletable(&self, file_name: &str) {
            self.undeletable.write().await.insert(file_name.to_string());
        }

        /// Drops a blob behind the cache's back.
        pub async fn remove_externally(&self, file_name: &str) {
            self.blobs.write().await.remove(file_name);
        }

        /// Returns true if a blob exists.
        pub async fn contains(&self, file_name: &str) -> bool {
            self.blobs.read().await.contains_key(file_name)
        }

        /// Number of stored blobs.
        pub async fn len(&self) -> usize {
            self.blobs.read().await.len()
        }
    }

    #[async_trait]
    impl BlobStorePort for MockBlobStore {
        async fn write(&self, file_name: &str, bytes: &[u8]) -> CacheResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(CacheError::BlobWriteFailed("mock write failure".into()));
            }
            self.blobs
                .write()
                .await
                .insert(file_name.to_string(), bytes.to_vec());
            Ok(())
        }

        async fn read_bytes(&self, file_name: &str) -> Option<Vec<u8>> {
            self.blobs.read().await.get(file_name).cloned()
        }

        async fn read(&self, file_name: &str) -> Option<Arc<image::DynamicImage>> {
            let bytes = self.read_bytes(file_name).await?;
            image::load_from_memory(&bytes).ok().map(Arc::new)
        }

        async fn delete(&self, file_name: &str) -> CacheResult<()> {
            if self.undeletable.read().await.contains(file_name) {
                return Err(CacheError::BlobDeleteFailed(format!(
                    "mock delete failure: {file_name}"
                )));
            }
            self.blobs.write().await.remove(file_name);
            Ok(())
        }
    }
}

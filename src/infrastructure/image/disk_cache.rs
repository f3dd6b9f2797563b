//! Filesystem blob store for encoded cache images.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::BlobStorePort;

use super::codec::ImageCodec;

/// Stores blobs as plain files inside one directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    blob_dir: PathBuf,
}

impl FsBlobStore {
    /// Creates a store rooted at `blob_dir`.
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(blob_dir: PathBuf) -> Self {
        Self { blob_dir }
    }

    /// The directory holding the blobs.
    #[must_use]
    pub fn blob_dir(&self) -> &Path {
        &self.blob_dir
    }

    fn blob_path(&self, file_name: &str) -> PathBuf {
        self.blob_dir.join(file_name)
    }

    async fn ensure_dir(&self) -> CacheResult<()> {
        fs::create_dir_all(&self.blob_dir).await.map_err(|e| {
            CacheError::DirectoryUnavailable(format!(
                "{}: {e}",
                self.blob_dir.display()
            ))
        })
    }
}

#[async_trait]
impl BlobStorePort for FsBlobStore {
    async fn write(&self, file_name: &str, bytes: &[u8]) -> CacheResult<()> {
        self.ensure_dir().await?;
        let path = self.blob_path(file_name);

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| CacheError::BlobWriteFailed(format!("Failed to create blob file: {e}")))?;

        file.write_all(bytes)
            .await
            .map_err(|e| CacheError::BlobWriteFailed(format!("Failed to write blob file: {e}")))?;

        file.flush()
            .await
            .map_err(|e| CacheError::BlobWriteFailed(format!("Failed to flush blob file: {e}")))?;

        debug!(file = %file_name, path = %path.display(), size = bytes.len(), "Stored blob");
        Ok(())
    }

    async fn read_bytes(&self, file_name: &str) -> Option<Vec<u8>> {
        let path = self.blob_path(file_name);
        match fs::read(&path).await {
            Ok(bytes) => {
                trace!(file = %file_name, "Blob hit");
                Some(bytes)
            }
            Err(e) => {
                trace!(file = %file_name, error = %e, "Blob miss");
                None
            }
        }
    }

    async fn read(&self, file_name: &str) -> Option<Arc<image::DynamicImage>> {
        let bytes = self.read_bytes(file_name).await?;
        match ImageCodec::decode_blocking(bytes).await {
            Ok(img) => Some(Arc::new(img)),
            Err(e) => {
                warn!(file = %file_name, error = %e, "Failed to decode cached blob");
                None
            }
        }
    }

    async fn delete(&self, file_name: &str) -> CacheResult<()> {
        let path = self.blob_path(file_name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(file = %file_name, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::BlobDeleteFailed(format!("{file_name}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::image::codec::test_support::png_bytes;
    use tempfile::TempDir;

    fn create_test_store() -> (FsBlobStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FsBlobStore::new(temp_dir.path().join("blobs"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_write_creates_directory_and_reads_back() {
        let (store, _temp) = create_test_store();
        assert!(!store.blob_dir().exists());

        store.write("one", b"raw bytes").await.unwrap();

        assert!(store.blob_dir().exists());
        assert_eq!(store.read_bytes("one").await.unwrap(), b"raw bytes");
    }

    #[tokio::test]
    async fn test_read_decodes_image() {
        let (store, _temp) = create_test_store();
        store.write("img", &png_bytes(20, 30)).await.unwrap();

        let img = store.read("img").await.unwrap();
        assert_eq!((img.width(), img.height()), (20, 30));
    }

    #[tokio::test]
    async fn test_missing_and_corrupt_blobs_are_misses() {
        let (store, _temp) = create_test_store();
        store.write("corrupt", b"not an image").await.unwrap();

        assert!(store.read("missing").await.is_none());
        assert!(store.read("corrupt").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (store, _temp) = create_test_store();
        store.write("gone", b"x").await.unwrap();

        store.delete("gone").await.unwrap();
        assert!(store.read_bytes("gone").await.is_none());
        store.delete("gone").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_fails_when_directory_is_blocked() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not dir").unwrap();
        let store = FsBlobStore::new(blocker.join("blobs"));

        let result = store.write("x", b"data").await;
        assert!(matches!(result, Err(CacheError::DirectoryUnavailable(_))));
    }
}

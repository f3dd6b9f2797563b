//! On-disk layout of a cache instance.

use std::path::{Path, PathBuf};

/// Default name of the ledger document inside the cache root.
pub const DEFAULT_LEDGER_FILE: &str = "WebCachedMeta.json";

/// Default name of the blob subdirectory inside the cache root.
pub const DEFAULT_BLOB_DIR: &str = "WebCachedImages";

/// Cache root containing one ledger document and one blob directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: PathBuf,
    ledger_file: String,
    blob_dir: String,
}

impl CacheLayout {
    /// Creates a layout with the default file and directory names.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ledger_file: DEFAULT_LEDGER_FILE.to_string(),
            blob_dir: DEFAULT_BLOB_DIR.to_string(),
        }
    }

    /// Overrides the ledger document name.
    #[must_use]
    pub fn with_ledger_file(mut self, name: impl Into<String>) -> Self {
        self.ledger_file = name.into();
        self
    }

    /// Overrides the blob directory name.
    #[must_use]
    pub fn with_blob_dir(mut self, name: impl Into<String>) -> Self {
        self.blob_dir = name.into();
        self
    }

    /// Uses the platform cache directory (~/.cache/webcache on Linux).
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(default_cache_root())
    }

    /// The cache root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the ledger document.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(&self.ledger_file)
    }

    /// Full path of the blob directory.
    #[must_use]
    pub fn blob_path(&self) -> PathBuf {
        self.root.join(&self.blob_dir)
    }
}

/// Returns the default cache root path.
fn default_cache_root() -> PathBuf {
    crate::project_dirs().map_or_else(
        || std::env::temp_dir().join(crate::NAME).join("cache"),
        |dirs| dirs.cache_dir().to_path_buf(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let layout = CacheLayout::new("/tmp/cache-root");
        assert_eq!(
            layout.ledger_path(),
            PathBuf::from("/tmp/cache-root/WebCachedMeta.json")
        );
        assert_eq!(
            layout.blob_path(),
            PathBuf::from("/tmp/cache-root/WebCachedImages")
        );
    }

    #[test]
    fn test_overrides() {
        let layout = CacheLayout::new("/r")
            .with_ledger_file("meta.json")
            .with_blob_dir("blobs");
        assert_eq!(layout.ledger_path(), PathBuf::from("/r/meta.json"));
        assert_eq!(layout.blob_path(), PathBuf::from("/r/blobs"));
    }
}

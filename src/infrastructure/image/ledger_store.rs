//! JSON ledger document on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::entities::Ledger;
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::LedgerPort;

/// Persists the ledger as a single JSON array, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    /// Creates a store for the ledger document at `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the ledger document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LedgerPort for JsonLedgerStore {
    async fn try_load(&self) -> CacheResult<Ledger> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No ledger document, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => {
                return Err(CacheError::LedgerDeserializeFailed(format!(
                    "Failed to read ledger: {e}"
                )));
            }
        };

        serde_json::from_slice(&content)
            .map_err(|e| CacheError::LedgerDeserializeFailed(e.to_string()))
    }

    async fn save(&self, ledger: &Ledger) -> CacheResult<()> {
        let content = serde_json::to_vec_pretty(ledger)
            .map_err(|e| CacheError::LedgerWriteFailed(e.to_string()))?;

        let parent = self
            .path
            .parent()
            .ok_or_else(|| CacheError::DirectoryUnavailable("Invalid ledger path".into()))?
            .to_path_buf();
        fs::create_dir_all(&parent)
            .await
            .map_err(|e| CacheError::DirectoryUnavailable(format!("{}: {e}", parent.display())))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut temp_file = tempfile::NamedTempFile::new_in(&parent)?;
            temp_file.write_all(&content)?;
            temp_file.as_file().sync_all()?;
            temp_file.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| CacheError::LedgerWriteFailed(format!("Save task panicked: {e}")))?
        .map_err(|e| CacheError::LedgerWriteFailed(e.to_string()))?;

        debug!(path = %self.path.display(), records = ledger.len(), "Saved ledger");
        Ok(())
    }
}

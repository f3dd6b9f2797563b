//! Port definition for the metadata ledger document.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::entities::Ledger;
use crate::domain::errors::CacheResult;

/// Port for loading and saving the cache ledger as one document.
#[async_trait]
pub trait LedgerPort: Send + Sync {
    /// Reads the persisted ledger.
    /// A missing document is an empty ledger; a corrupt one is an error.
    async fn try_load(&self) -> CacheResult<Ledger>;

    /// Overwrites the persisted ledger with `ledger`.
    async fn save(&self, ledger: &Ledger) -> CacheResult<()>;

    /// Reads the persisted ledger, treating any failure as a cold start.
    async fn load(&self) -> Ledger {
        match self.try_load().await {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(error = %e, "Ledger unreadable, starting empty");
                Ledger::new()
            }
        }
    }
}

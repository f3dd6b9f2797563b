//! Disk-backed image cache with a metadata ledger and expiry.
//!
//! The coordinator owns the ledger: every operation loads the whole document,
//! works on it in memory and writes it back. A per-instance mutex serializes
//! these load-modify-save sequences, so concurrent stores through one
//! coordinator never lose records. Separate instances sharing a directory
//! are not coordinated and the last save wins.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::domain::entities::{CacheRecord, CachedImage, Ledger};
use crate::domain::errors::CacheResult;
use crate::domain::ports::{BlobStorePort, ClockPort, LedgerPort};
use crate::domain::services::ExpiryPolicy;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::image::{CacheLayout, FsBlobStore, ImageCodec, JsonLedgerStore};

/// Outcome of an eviction sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Records dropped from the ledger.
    pub removed: usize,
    /// Records left in the ledger.
    pub retained: usize,
    /// Blobs that could not be deleted.
    pub failed_deletions: Vec<String>,
}

/// Public surface of the image cache.
pub struct CacheCoordinator {
    blobs: Arc<dyn BlobStorePort>,
    ledger: Arc<dyn LedgerPort>,
    clock: Arc<dyn ClockPort>,
    policy: ExpiryPolicy,
    codec: ImageCodec,
    ledger_lock: Mutex<()>,
}

impl std::fmt::Debug for CacheCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheCoordinator")
            .field("policy", &self.policy)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl CacheCoordinator {
    /// Creates a coordinator over the given collaborators.
    #[must_use]
    pub fn new(
        blobs: Arc<dyn BlobStorePort>,
        ledger: Arc<dyn LedgerPort>,
        clock: Arc<dyn ClockPort>,
        policy: ExpiryPolicy,
        codec: ImageCodec,
    ) -> Self {
        Self {
            blobs,
            ledger,
            clock,
            policy,
            codec,
            ledger_lock: Mutex::new(()),
        }
    }

    /// Creates a coordinator backed by files under `layout`.
    #[must_use]
    pub fn on_disk(
        layout: &CacheLayout,
        policy: ExpiryPolicy,
        codec: ImageCodec,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self::new(
            Arc::new(FsBlobStore::new(layout.blob_path())),
            Arc::new(JsonLedgerStore::new(layout.ledger_path())),
            clock,
            policy,
            codec,
        )
    }

    /// Creates an on-disk coordinator using the system clock.
    #[must_use]
    pub fn open(layout: &CacheLayout, policy: ExpiryPolicy, codec: ImageCodec) -> Self {
        Self::on_disk(layout, policy, codec, Arc::new(SystemClock))
    }

    /// The expiry policy of this instance.
    #[must_use]
    pub const fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Returns the cached image for `url`, or None on a miss.
    ///
    /// An expired hit triggers a full eviction sweep. A record whose blob is
    /// missing or undecodable is dropped from the ledger on its own.
    pub async fn lookup(&self, url: &str) -> Option<CachedImage> {
        let _guard = self.ledger_lock.lock().await;
        let mut ledger = self.ledger.load().await;

        let Some(record) = ledger.find_by_url(url).cloned() else {
            trace!(url = %url, "Cache miss");
            return None;
        };

        let now = self.clock.now();
        if self.policy.is_expired(&record, now) {
            debug!(url = %url, file = %record.file_name(), "Cached image expired");
            if let Err(e) = self.sweep(ledger, now).await {
                warn!(error = %e, "Eviction sweep failed");
            }
            return None;
        }

        if let Some(image) = self.blobs.read(record.file_name()).await {
            trace!(url = %url, file = %record.file_name(), "Cache hit");
            return Some(CachedImage { record, image });
        }

        // Drop only the record whose blob is broken. Other records for this
        // URL stay and can be served by a later lookup.
        ledger.remove_file(record.file_name());
        match self.ledger.save(&ledger).await {
            Ok(()) => warn!(
                url = %url,
                file = %record.file_name(),
                "Blob missing or unreadable, removed ledger record"
            ),
            Err(e) => warn!(url = %url, error = %e, "Failed to persist self-healed ledger"),
        }
        None
    }

    /// Decodes `bytes`, re-encodes them for storage and records them under `url`.
    ///
    /// # Errors
    /// Returns `DecodeFailed` if the bytes are not an image, or the first
    /// storage error. A failed blob write leaves the ledger untouched.
    pub async fn store(&self, url: &str, bytes: &[u8]) -> CacheResult<CacheRecord> {
        let image = ImageCodec::decode_blocking(bytes.to_vec()).await?;
        self.store_image(url, Arc::new(image)).await
    }

    /// Stores an already decoded image under `url`.
    ///
    /// # Errors
    /// Returns the encoding, blob write or ledger save error.
    pub async fn store_image(
        &self,
        url: &str,
        image: Arc<image::DynamicImage>,
    ) -> CacheResult<CacheRecord> {
        let encoded = self.codec.encode_blocking(image).await?;
        let now = self.clock.now();
        let file_name = blob_file_name(now);

        self.blobs.write(&file_name, &encoded).await?;

        let record = CacheRecord::new(url, file_name, now);
        let _guard = self.ledger_lock.lock().await;
        let mut ledger = self.ledger.load().await;
        ledger.push(record.clone());

        if let Err(e) = self.ledger.save(&ledger).await {
            if let Err(del) = self.blobs.delete(record.file_name()).await {
                warn!(file = %record.file_name(), error = %del, "Failed to remove unrecorded blob");
            }
            return Err(e);
        }

        debug!(url = %url, file = %record.file_name(), size = encoded.len(), "Stored image");
        Ok(record)
    }

    /// Removes every expired record and its blob.
    ///
    /// # Errors
    /// Returns error if the pruned ledger cannot be saved. Blob deletion
    /// failures are reported in the [`SweepReport`] instead.
    pub async fn evict_expired(&self) -> CacheResult<SweepReport> {
        let _guard = self.ledger_lock.lock().await;
        let ledger = self.ledger.load().await;
        self.sweep(ledger, self.clock.now()).await
    }

    /// Removes every record and its blob.
    ///
    /// # Errors
    /// Returns error if the emptied ledger cannot be saved.
    pub async fn clear(&self) -> CacheResult<SweepReport> {
        let _guard = self.ledger_lock.lock().await;
        let ledger = self.ledger.load().await;
        self.ledger.save(&Ledger::new()).await?;

        let removed = ledger.len();
        let failed_deletions = self.delete_blobs(ledger).await;
        info!(removed = removed, "Cleared image cache");

        Ok(SweepReport {
            removed,
            retained: 0,
            failed_deletions,
        })
    }

    /// Snapshot of the ledger in insertion order.
    pub async fn entries(&self) -> Vec<CacheRecord> {
        let _guard = self.ledger_lock.lock().await;
        self.ledger.load().await.into_iter().collect()
    }

    /// Saves the fresh part of `ledger` first, then deletes expired blobs.
    /// Caller must hold `ledger_lock`.
    async fn sweep(&self, ledger: Ledger, now: DateTime<Utc>) -> CacheResult<SweepReport> {
        let (fresh, expired) = ledger.partition_expired(&self.policy, now);
        if expired.is_empty() {
            return Ok(SweepReport {
                retained: fresh.len(),
                ..SweepReport::default()
            });
        }

        self.ledger.save(&fresh).await?;

        let removed = expired.len();
        let failed_deletions = self.delete_blobs(expired).await;
        debug!(
            removed = removed,
            retained = fresh.len(),
            failed = failed_deletions.len(),
            "Eviction sweep complete"
        );

        Ok(SweepReport {
            removed,
            retained: fresh.len(),
            failed_deletions,
        })
    }

    async fn delete_blobs(&self, records: Ledger) -> Vec<String> {
        let mut failed = Vec::new();
        for record in records {
            if let Err(e) = self.blobs.delete(record.file_name()).await {
                warn!(file = %record.file_name(), error = %e, "Could not delete blob");
                failed.push(record.file_name().to_string());
            }
        }
        failed
    }
}

/// Timestamp-derived blob name with a random suffix against collisions.
fn blob_file_name(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}.jpg", now.timestamp_micros(), &suffix[..8])
}

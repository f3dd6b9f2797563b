//! Cache metadata records and the ledger that holds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::ExpiryPolicy;

/// Metadata for one persisted image blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    source_url: String,
    file_name: String,
    #[serde(rename = "created")]
    created_at: DateTime<Utc>,
}

impl CacheRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        source_url: impl Into<String>,
        file_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            file_name: file_name.into(),
            created_at,
        }
    }

    /// The remote URL the image was fetched from.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Name of the blob file holding the encoded image.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// When the blob was stored.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Ordered collection of cache records, persisted as one document.
///
/// Several records may share a `source_url` after repeated stores; lookups
/// return the first one in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<CacheRecord>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns the first record whose source URL matches.
    #[must_use]
    pub fn find_by_url(&self, url: &str) -> Option<&CacheRecord> {
        self.records.iter().find(|r| r.source_url == url)
    }

    /// Appends a record.
    pub fn push(&mut self, record: CacheRecord) {
        self.records.push(record);
    }

    /// Removes the record pointing at `file_name`, returning it if present.
    pub fn remove_file(&mut self, file_name: &str) -> Option<CacheRecord> {
        let pos = self.records.iter().position(|r| r.file_name == file_name)?;
        Some(self.records.remove(pos))
    }

    /// Splits the ledger into `(fresh, expired)` ledgers, preserving order.
    #[must_use]
    pub fn partition_expired(self, policy: &ExpiryPolicy, now: DateTime<Utc>) -> (Self, Self) {
        let (expired, fresh): (Vec<_>, Vec<_>) = self
            .records
            .into_iter()
            .partition(|r| policy.is_expired(r, now));
        (Self { records: fresh }, Self { records: expired })
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CacheRecord> {
        self.records.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<CacheRecord>> for Ledger {
    fn from(records: Vec<CacheRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for Ledger {
    type Item = CacheRecord;
    type IntoIter = std::vec::IntoIter<CacheRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a CacheRecord;
    type IntoIter = std::slice::Iter<'a, CacheRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

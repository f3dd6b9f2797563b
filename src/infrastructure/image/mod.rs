//! Image cache infrastructure.
//!
//! This module provides:
//! - Filesystem blob storage
//! - JSON ledger persistence
//! - JPEG re-encoding for stored blobs
//! - HTTP image fetching

pub mod codec;
pub mod disk_cache;
pub mod fetcher;
pub mod layout;
pub mod ledger_store;

pub use codec::{DEFAULT_JPEG_QUALITY, ImageCodec};
pub use disk_cache::FsBlobStore;
pub use fetcher::{DEFAULT_FETCH_TIMEOUT_SECS, HttpImageFetcher};
pub use layout::{CacheLayout, DEFAULT_BLOB_DIR, DEFAULT_LEDGER_FILE};
pub use ledger_store::JsonLedgerStore;

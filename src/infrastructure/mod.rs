//! Infrastructure layer with filesystem, network and configuration adapters.

/// System clock.
pub mod clock;
/// Application configuration.
pub mod config;
/// Image cache storage, codec and fetching.
pub mod image;

pub use clock::SystemClock;
pub use config::{AppConfig, CacheConfig, CliArgs, Command, LogLevel, StorageManager};
pub use self::image::{CacheLayout, FsBlobStore, HttpImageFetcher, ImageCodec, JsonLedgerStore};

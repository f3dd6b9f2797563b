//! Domain layer with core cache entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{CacheRecord, CachedImage, ImageSource, Ledger, LoadedImage};
pub use errors::{CacheError, CacheResult};
pub use services::ExpiryPolicy;

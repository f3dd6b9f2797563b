//! Domain entities.

mod cache_record;
mod loaded_image;

pub use cache_record::{CacheRecord, Ledger};
pub use loaded_image::{CachedImage, ImageSource, LoadedImage};

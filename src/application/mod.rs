//! Application layer with the cache coordinator and use cases.

/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{CacheCoordinator, SweepReport};
pub use use_cases::{ImageLoadedEvent, LoadImageUseCase};

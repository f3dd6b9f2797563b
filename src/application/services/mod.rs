//! Application services.

mod cache_coordinator;

pub use cache_coordinator::{CacheCoordinator, SweepReport};

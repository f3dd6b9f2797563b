//! Pure domain services.

mod expiry_policy;

pub use expiry_policy::{DEFAULT_EXPIRY_DAYS, ExpiryPolicy};

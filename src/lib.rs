//! webcache - a disk-backed cache for remote images.
//!
//! Images are stored as JPEG blobs next to a JSON ledger that records the
//! source URL, blob file name and creation time of every entry. Entries
//! expire after a configurable number of days.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the cache coordinator and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing filesystem, network and config adapters.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "webcache";

/// Qualifier used for platform directory lookup.
pub const QUALIFIER: &str = "com";

/// Organization used for platform directory lookup.
pub const ORGANIZATION: &str = "linuxmobile";

/// Returns the platform config, cache and data directories for the app.
#[must_use]
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, NAME)
}

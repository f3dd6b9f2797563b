//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::domain::services::{DEFAULT_EXPIRY_DAYS, ExpiryPolicy};
use crate::infrastructure::image::{
    CacheLayout, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_JPEG_QUALITY, ImageCodec,
};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

/// Application configuration, read from `config.toml` and CLI overrides.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Image cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Image cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache root directory. Defaults to the platform cache directory.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,

    /// Days an entry stays fresh.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,

    /// Network request timeout in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// JPEG quality for stored blobs (1-100).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            expiry_days: DEFAULT_EXPIRY_DAYS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CacheConfig {
    /// Returns the on-disk layout for the configured root.
    #[must_use]
    pub fn layout(&self) -> CacheLayout {
        self.root_dir
            .as_ref()
            .map_or_else(CacheLayout::default_location, CacheLayout::new)
    }

    /// Expiry policy for `expiry_days`.
    #[must_use]
    pub const fn policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::new(self.expiry_days)
    }

    #[must_use]
    pub fn codec(&self) -> ImageCodec {
        ImageCodec::new(self.jpeg_quality)
    }

    /// Timeout for a single image download.
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

const fn default_expiry_days() -> u32 {
    DEFAULT_EXPIRY_DAYS
}

const fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

const fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache.root_dir = Some(cache_dir.clone());
        }
        if let Some(expiry_days) = args.expiry_days {
            self.cache.expiry_days = expiry_days;
        }
        if let Some(timeout) = args.timeout {
            self.cache.fetch_timeout_secs = timeout;
        }
    }

    /// Returns the default `config.toml` location in the platform config directory.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        crate::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

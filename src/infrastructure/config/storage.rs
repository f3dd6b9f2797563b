//! Locating and reading `config.toml`.

use super::app_config::AppConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while resolving or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No override was given and the platform has no config directory.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Reading or writing the file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The default configuration could not be serialized.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Owns the location of the configuration file.
///
/// The first run writes a default file so users have something to edit.
/// A file that no longer parses is left untouched and defaults are used.
#[derive(Debug, Clone)]
pub struct StorageManager {
    config_path: PathBuf,
}

impl StorageManager {
    /// Uses `path_override` if given, otherwise the platform default location.
    ///
    /// # Errors
    ///
    /// Returns `ConfigDirNotFound` if there is no override and no home directory.
    pub fn locate(path_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = path_override
            .or_else(AppConfig::default_config_path)
            .ok_or(ConfigError::ConfigDirNotFound)?;
        Ok(Self { config_path })
    }

    /// The configuration file this manager reads.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_path.exists() {
            info!(path = %self.config_path.display(), "Config file not found, writing defaults");
            let default_config = AppConfig::default();
            self.write_config(&default_config)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %self.config_path.display(), "Loaded config");
                Ok(config)
            }
            Err(e) => {
                warn!(path = %self.config_path.display(), error = %e, "Invalid config file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    fn write_config(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;

        let parent = self
            .config_path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid config path"))?;
        fs::create_dir_all(parent)?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(&self.config_path).map_err(|e| e.error)?;

        Ok(())
    }
}

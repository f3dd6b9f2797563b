use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments. Global flags override `config.toml`.
#[derive(Debug, Parser)]
#[command(
    name = "webcache",
    version,
    about = "Disk-backed cache for remote images",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Cache root directory.
    #[arg(long, value_name = "DIR", env = "WEBCACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Days an entry stays fresh.
    #[arg(long, global = true)]
    pub expiry_days: Option<u32>,

    /// Network request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Cache operation to run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load an image through the cache, downloading it on a miss.
    Get {
        /// Image URL.
        url: String,
        /// Write the image as PNG to this path.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Check whether an image is cached, without downloading.
    Lookup {
        /// Image URL.
        url: String,
    },
    /// Remove expired entries.
    Evict,
    /// List cache entries.
    List,
    /// Remove every entry.
    Clear,
}

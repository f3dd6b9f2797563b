use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use webcache::application::{CacheCoordinator, LoadImageUseCase};
use webcache::infrastructure::{AppConfig, CliArgs, Command, HttpImageFetcher, StorageManager};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level.to_tracing_level()).into())
        .from_env_lossy();

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, StorageManager)> {
    let storage = StorageManager::locate(args.config.clone())?;
    let mut config = storage.load_config()?;
    config.merge_with_args(args);
    Ok((config, storage))
}

async fn run(command: Command, cache: Arc<CacheCoordinator>, config: &AppConfig) -> Result<()> {
    match command {
        Command::Get { url, output } => {
            let fetcher = Arc::new(HttpImageFetcher::new(config.cache.fetch_timeout())?);
            let use_case = LoadImageUseCase::new(cache, fetcher);
            let loaded = use_case
                .execute(&url)
                .await
                .wrap_err_with(|| format!("Failed to load {url}"))?;
            println!(
                "{} {}x{} ({})",
                loaded.url,
                loaded.width(),
                loaded.height(),
                loaded.source
            );
            if let Some(path) = output {
                loaded
                    .image
                    .save_with_format(&path, image::ImageFormat::Png)
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            }
        }
        Command::Lookup { url } => match cache.lookup(&url).await {
            Some(hit) => println!(
                "hit {} {}x{} created {}",
                hit.record.file_name(),
                hit.image.width(),
                hit.image.height(),
                hit.record.created_at().to_rfc3339()
            ),
            None => println!("miss"),
        },
        Command::Evict => {
            let report = cache.evict_expired().await?;
            println!(
                "removed {} retained {} failed {}",
                report.removed,
                report.retained,
                report.failed_deletions.len()
            );
        }
        Command::List => {
            for record in cache.entries().await {
                println!(
                    "{}\t{}\t{}",
                    record.created_at().to_rfc3339(),
                    record.file_name(),
                    record.source_url()
                );
            }
        }
        Command::Clear => {
            let report = cache.clear().await?;
            println!("removed {}", report.removed);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let (config, storage) = load_config(&args)?;

    init_logging(&config)?;

    let layout = config.cache.layout();
    let policy = config.cache.policy();
    info!(
        version = webcache::VERSION,
        config = %storage.config_path().display(),
        root = %layout.root().display(),
        expiry_days = policy.interval_days(),
        "Starting webcache"
    );

    let cache = Arc::new(CacheCoordinator::open(
        &layout,
        policy,
        config.cache.codec(),
    ));

    run(args.command, cache, &config).await
}

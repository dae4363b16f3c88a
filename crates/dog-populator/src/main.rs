//! Dog populator CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use shared::Config;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config
            .logging
            .default_level
            .parse()
            .with_context(|| format!("Invalid log level: {}", config.logging.default_level))?
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "dog-populator".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!("Dog populator starting");
    info!(
        config_file = %args.config.display(),
        base_url = %config.api.base_url,
        db_path = %config.database_path().display(),
        "Loaded configuration"
    );

    let stats = match dog_populator::run(&config).await {
        Ok(stats) => stats,
        Err(e) => {
            let stage = e.stage();
            let breed = e.breed().unwrap_or("-").to_string();
            let e = anyhow::Error::from(e);
            error!(stage = stage, breed = %breed, error = %format!("{:#}", e), "Population aborted");
            return Err(e);
        }
    };

    info!("=== Population Complete ===");
    info!("Breeds: {}", stats.breeds);
    info!("Pages fetched: {}", stats.pages);
    info!("Dogs fetched: {}", stats.dogs_fetched);
    info!("Dogs inserted: {}", stats.dogs_inserted);

    Ok(())
}

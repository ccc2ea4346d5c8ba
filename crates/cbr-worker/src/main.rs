//! CBR receiver - worker entry point

use std::time::Duration;

use anyhow::Result;
use cbr_common::logging::{init_logging, LogConfig, LogLevel};
use cbr_worker::config::Config;
use cbr_worker::fetcher::RateFetcher;
use cbr_worker::storage::PgRateStore;
use cbr_worker::worker::RatesWorker;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cbr-worker")]
#[command(author, version, about = "CBR exchange-rate receiver")]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env().unwrap_or_else(|_| LogConfig::builder().build());
    log_config
        .filter_directives
        .get_or_insert_with(|| "sqlx=warn".to_string());
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }
    init_logging(&log_config)?;

    info!("Starting CBR receiver");

    let config = Config::load()?;
    info!(
        "Polling {} every {} seconds",
        config.feed.url, config.poll_interval_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .connect(&config.database.url)
        .await?;
    info!("Database connection pool established");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    info!("Database migrations completed");

    let fetcher = RateFetcher::new(config.feed.clone())?;
    let store = PgRateStore::new(pool);
    let worker = RatesWorker::new(
        fetcher,
        store,
        Duration::from_secs(config.poll_interval_secs),
    );

    worker.run().await;

    Ok(())
}

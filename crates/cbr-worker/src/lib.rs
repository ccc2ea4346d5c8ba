//! CBR exchange-rate receiver.
//!
//! Polls the Central Bank of Russia daily rate feed, decodes the `ValCurs`
//! document, and keeps two PostgreSQL tables current: an append-only quote
//! history and a reference table with the latest attributes per currency.
//!
//! One cycle runs fetch → parse → store (quotes, then currencies); a failed
//! cycle is logged and skipped, and the worker sleeps until the next poll.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use cbr_worker::{config::Config, fetcher::RateFetcher, storage::PgRateStore, worker::RatesWorker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = sqlx::PgPool::connect(&config.database.url).await?;
//!     let worker = RatesWorker::new(
//!         RateFetcher::new(config.feed.clone())?,
//!         PgRateStore::new(pool),
//!         Duration::from_secs(config.poll_interval_secs),
//!     );
//!     worker.run().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod models;
pub mod storage;
pub mod transform;
pub mod worker;

// Re-export commonly used types
pub use error::{CbrError, Result};

//! Worker loop.
//!
//! Drives one fetch → parse → store cycle per poll interval, forever. A
//! cycle's stages short-circuit on the first error; the loop itself never
//! gives up — the error is logged and the next poll starts on schedule.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use crate::error::Result;
use crate::feed;
use crate::fetcher::RateFetcher;
use crate::models::ParsedFeed;
use crate::storage::RateStore;
use crate::transform;

/// Row counts persisted by one completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub quotes: usize,
    pub currencies: usize,
}

/// The persist stages of a cycle, applied in fixed order: quotes first,
/// currencies second. There are exactly two; the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Quotes,
    Currencies,
}

const STAGES: [Stage; 2] = [Stage::Quotes, Stage::Currencies];

impl Stage {
    /// Transform the parsed feed into this stage's row set and persist it,
    /// returning the number of rows written.
    async fn apply<S: RateStore>(self, parsed: &ParsedFeed, store: &S) -> Result<usize> {
        match self {
            Stage::Quotes => {
                let rows = transform::quote_rows(parsed.date, &parsed.entries)?;
                store.insert_quotes(&rows).await?;
                Ok(rows.len())
            },
            Stage::Currencies => {
                let rows = transform::currency_rows(&parsed.entries)?;
                store.upsert_currencies(&rows).await?;
                Ok(rows.len())
            },
        }
    }
}

/// Polling worker: receives the daily feed and persists it.
pub struct RatesWorker<S> {
    fetcher: RateFetcher,
    store: S,
    poll_interval: Duration,
}

impl<S: RateStore> RatesWorker<S> {
    pub fn new(fetcher: RateFetcher, store: S, poll_interval: Duration) -> Self {
        Self {
            fetcher,
            store,
            poll_interval,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run cycles until the process is stopped externally.
    ///
    /// Every outcome is logged; a failed cycle skips its remaining writes
    /// but never terminates the loop.
    pub async fn run(&self) {
        loop {
            match self.run_cycle().await {
                Ok(stats) => {
                    info!(
                        quotes = stats.quotes,
                        currencies = stats.currencies,
                        "Data received and successfully added to DB."
                    );
                },
                // TODO notifier for feed format changes
                Err(e) => error!("Cycle failed: {}", e),
            }

            info!("Waiting for the next iteration ...");
            sleep(self.poll_interval).await;
        }
    }

    /// One fetch → parse → store pass.
    ///
    /// The `?` chain is the gate between stages: the first failure ends the
    /// cycle and the remaining stages do not run.
    pub async fn run_cycle(&self) -> Result<CycleStats> {
        let document = self.fetcher.fetch().await?;
        let parsed = feed::parse(&document)?;

        let mut stats = CycleStats {
            quotes: 0,
            currencies: 0,
        };

        for stage in STAGES {
            let rows_written = stage.apply(&parsed, &self.store).await?;
            match stage {
                Stage::Quotes => stats.quotes = rows_written,
                Stage::Currencies => stats.currencies = rows_written,
            }
        }

        Ok(stats)
    }
}

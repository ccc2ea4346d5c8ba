//! Feed fetching with bounded retry.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::config::FeedConfig;
use crate::error::{CbrError, Result};

/// HTTP client for the daily feed endpoint.
pub struct RateFetcher {
    client: Client,
    config: FeedConfig,
}

impl RateFetcher {
    /// Create a new fetcher with the given configuration
    pub fn new(config: FeedConfig) -> Result<Self> {
        config.validate().map_err(CbrError::Config)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("cbr-receiver/0.1")
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the daily document, retrying failed attempts with exponential
    /// backoff.
    ///
    /// Returns the response body verbatim on the first HTTP 200. A non-200
    /// status and a network-level error both count as a failed attempt;
    /// once `max_retries` attempts are spent the last failure surfaces as
    /// [`CbrError::RetriesExhausted`].
    pub async fn fetch(&self) -> Result<String> {
        let mut last_error = None;

        for attempt in 1..=self.config.max_retries {
            match self.fetch_once().await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(
                        "Fetch attempt {}/{} failed: {}",
                        attempt, self.config.max_retries, e
                    );
                    last_error = Some(e);

                    if attempt < self.config.max_retries {
                        let backoff_secs =
                            self.config.backoff_base_secs * 2u64.pow(attempt - 1);
                        info!("Retrying in {} seconds...", backoff_secs);
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    }
                },
            }
        }

        Err(CbrError::RetriesExhausted {
            attempts: self.config.max_retries,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no error captured".to_string()),
        })
    }

    /// One GET against the feed endpoint; only HTTP 200 is a success.
    async fn fetch_once(&self) -> Result<String> {
        let response = self.client.get(&self.config.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CbrError::FeedStatus(status));
        }

        Ok(response.text().await?)
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};

// ============================================================================
// Receiver Configuration Constants
// ============================================================================

/// Default feed endpoint (the CBR daily `ValCurs` document).
pub const DEFAULT_FEED_URL: &str = "https://www.cbr.ru/scripts/XML_daily.asp";

/// Default HTTP timeout per fetch attempt, in seconds.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// Default maximum fetch attempts per cycle.
pub const DEFAULT_FEED_MAX_RETRIES: u32 = 5;

/// Default backoff base in seconds; attempt n waits base * 2^(n-1).
pub const DEFAULT_FEED_BACKOFF_SECS: u64 = 10;

/// Default poll interval between cycles (one day).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 86_400;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/cbr";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Receiver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,
    pub database: DatabaseConfig,
    pub poll_interval_secs: u64,
}

/// Feed endpoint and retry policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            feed: FeedConfig {
                url: std::env::var("CBR_FEED_URL")
                    .unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
                timeout_secs: std::env::var("CBR_FEED_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_FEED_TIMEOUT_SECS),
                max_retries: std::env::var("CBR_FEED_MAX_RETRIES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_FEED_MAX_RETRIES),
                backoff_base_secs: std::env::var("CBR_FEED_BACKOFF")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_FEED_BACKOFF_SECS),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
                connect_timeout_secs: std::env::var("DATABASE_CONNECT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS),
            },
            poll_interval_secs: std::env::var("CBR_POLL_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.feed.validate().map_err(|e| anyhow::anyhow!(e))?;

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if self.poll_interval_secs == 0 {
            anyhow::bail!("Poll interval must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            database: DatabaseConfig::default(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl FeedConfig {
    /// Validate feed settings
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Feed URL cannot be empty".to_string());
        }

        if self.max_retries == 0 {
            return Err("Feed max_retries must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
            max_retries: DEFAULT_FEED_MAX_RETRIES,
            backoff_base_secs: DEFAULT_FEED_BACKOFF_SECS,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
        }
    }
}

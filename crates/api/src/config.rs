use std::time::Duration;

use hackradar_core::hackathon::DEFAULT_LIMIT;
use hackradar_search::prompt::DEFAULT_QUERY;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins for the JSON API, parsed from comma-separated
    /// `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `180`). Must outlast an
    /// on-demand scrape, which waits on the search model.
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background jobs, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Scrape scheduling settings.
    pub scrape: ScrapeConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `5000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5000` |
    /// | `REQUEST_TIMEOUT_SECS`  | `180`                   |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            scrape: ScrapeConfig::from_env(),
        }
    }
}

/// Settings for the periodic scrape job and on-demand scrapes.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Time between scheduled scrapes.
    pub interval: Duration,
    /// Delay before the first scrape after startup.
    pub initial_delay: Duration,
    /// Maximum hackathons kept per cycle.
    pub limit: usize,
    /// Query used by scheduled scrapes and by on-demand scrapes without one.
    pub default_query: String,
}

/// Default hours between scheduled scrapes.
const DEFAULT_INTERVAL_HOURS: u64 = 6;

/// Default seconds to wait before the startup scrape.
const DEFAULT_INITIAL_DELAY_SECS: u64 = 2;

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_HOURS * 3600),
            initial_delay: Duration::from_secs(DEFAULT_INITIAL_DELAY_SECS),
            limit: DEFAULT_LIMIT,
            default_query: DEFAULT_QUERY.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Load scrape settings from environment variables with defaults.
    ///
    /// | Env Var                     | Default                          |
    /// |-----------------------------|----------------------------------|
    /// | `SCRAPE_INTERVAL_HOURS`     | `6`                              |
    /// | `SCRAPE_INITIAL_DELAY_SECS` | `2`                              |
    /// | `SCRAPE_LIMIT`              | `10`                             |
    /// | `SCRAPE_QUERY`              | `popular latest hackathons ...`  |
    pub fn from_env() -> Self {
        let interval_hours: u64 = std::env::var("SCRAPE_INTERVAL_HOURS")
            .unwrap_or_else(|_| DEFAULT_INTERVAL_HOURS.to_string())
            .parse()
            .expect("SCRAPE_INTERVAL_HOURS must be a valid u64");
        assert!(interval_hours > 0, "SCRAPE_INTERVAL_HOURS must be positive");

        let initial_delay_secs: u64 = std::env::var("SCRAPE_INITIAL_DELAY_SECS")
            .unwrap_or_else(|_| DEFAULT_INITIAL_DELAY_SECS.to_string())
            .parse()
            .expect("SCRAPE_INITIAL_DELAY_SECS must be a valid u64");

        let limit: usize = std::env::var("SCRAPE_LIMIT")
            .unwrap_or_else(|_| DEFAULT_LIMIT.to_string())
            .parse()
            .expect("SCRAPE_LIMIT must be a valid usize");

        let default_query = std::env::var("SCRAPE_QUERY")
            .ok()
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUERY.to_string());

        Self {
            interval: Duration::from_secs(interval_hours * 3600),
            initial_delay: Duration::from_secs(initial_delay_secs),
            limit,
            default_query,
        }
    }
}

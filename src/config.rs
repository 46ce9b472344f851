//! Configuration types for board-updater

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Exchange-rate API returning `{"btc_to_usd": "..."}`
pub const EXCHANGE_RATE_URL: &str = "https://coinbase.com/api/v1/currencies/exchange_rates";
/// Full market-data dump containing every market's recent trades
pub const MARKET_DATA_URL: &str = "http://pubapi.cryptsy.com/api.php?method=marketdatav2";
/// Feed polled for new posts
pub const FEED_URL: &str = "http://www.reddit.com/r/bitbar/.rss";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub price: PriceConfig,
    pub feed: FeedConfig,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

/// Endpoints and selectors for the price updater
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    /// USD-per-BTC exchange-rate endpoint
    pub exchange_rate_url: String,
    /// Field of the exchange-rate object holding the USD quote
    pub quote_field: String,
    /// Market-data endpoint
    pub market_data_url: String,
    /// Market key inside the market-data dump
    pub market_pair: String,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            exchange_rate_url: EXCHANGE_RATE_URL.to_string(),
            quote_field: "btc_to_usd".to_string(),
            market_data_url: MARKET_DATA_URL.to_string(),
            market_pair: "BTB/BTC".to_string(),
        }
    }
}

/// Feed location and the label stamped on every stored post
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub source: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: FEED_URL.to_string(),
            source: "/r/bitbar".to_string(),
        }
    }
}

/// Shared HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Whole-request timeout. Unset means requests may block indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("board-updater/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// SQLite database location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("board.db"),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [price]
            exchange_rate_url = "http://localhost:8080/rates"
            quote_field = "btc_to_usd"
            market_data_url = "http://localhost:8080/markets"
            market_pair = "LTC/BTC"

            [feed]
            url = "http://localhost:8080/feed.rss"
            source = "/r/litecoin"

            [http]
            user_agent = "test-agent"
            timeout_secs = 15

            [database]
            path = "/tmp/board.db"

            [telemetry]
            log_level = "debug"
            log_format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.price.market_pair, "LTC/BTC");
        assert_eq!(config.feed.source, "/r/litecoin");
        assert_eq!(config.http.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.database.path, PathBuf::from("/tmp/board.db"));
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.price.exchange_rate_url, EXCHANGE_RATE_URL);
        assert_eq!(config.price.quote_field, "btc_to_usd");
        assert_eq!(config.price.market_data_url, MARKET_DATA_URL);
        assert_eq!(config.price.market_pair, "BTB/BTC");
        assert_eq!(config.feed.url, FEED_URL);
        assert_eq!(config.feed.source, "/r/bitbar");
        assert!(config.http.timeout().is_none());
        assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml = r#"
            [feed]
            source = "/r/custom"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.feed.source, "/r/custom");
        assert_eq!(config.feed.url, FEED_URL);
    }

    #[test]
    fn test_invalid_log_format() {
        let toml = r#"
            [telemetry]
            log_format = "xml"
        "#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.toml.example")).unwrap();
        assert_eq!(config.feed.source, "/r/bitbar");
        assert_eq!(config.price.market_pair, "BTB/BTC");
    }
}

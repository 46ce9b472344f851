//! Error types for the updaters and the store

use thiserror::Error;

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite failure (open, schema, query or insert)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row could not be mapped back into a record
    #[error("Corrupt row in {table}: {reason}")]
    Corrupt { table: &'static str, reason: String },
    /// The backend refused the write
    #[error("Insert rejected: {0}")]
    Rejected(String),
}

/// Errors that abort an update cycle
///
/// Nothing is retried locally; the caller decides whether to try again on
/// the next tick.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Connection refused, DNS failure, timeout, body read failure
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Remote answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// Response body did not match the expected JSON shape
    #[error("Unexpected JSON in {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// Response body was not a readable RSS or Atom document
    #[error("Unreadable feed at {url}: {source}")]
    Feed {
        url: String,
        #[source]
        source: feed_rs::parser::ParseFeedError,
    },
    /// Exchange-rate response lacks the configured quote field
    #[error("Quote field `{0}` missing from exchange-rate response")]
    MissingField(String),
    /// Market pair absent from the market-data dump
    #[error("Market {0} not found in market data")]
    MissingMarket(String),
    /// Market pair present but without trades
    #[error("Market {0} has no recent trades")]
    NoRecentTrades(String),
    /// Quote string is not a finite decimal number
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },
    /// Persistence failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UpdateError {
    /// Short, stable label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            UpdateError::Transport { .. } | UpdateError::Status { .. } => "transport",
            UpdateError::Json { .. } | UpdateError::Feed { .. } => "decode",
            UpdateError::MissingField(_)
            | UpdateError::MissingMarket(_)
            | UpdateError::NoRecentTrades(_)
            | UpdateError::InvalidNumber { .. } => "data",
            UpdateError::Store(_) => "store",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(UpdateError::MissingMarket("BTB/BTC".into()).kind(), "data");
        assert_eq!(
            UpdateError::Status {
                url: "http://x".into(),
                status: 502
            }
            .kind(),
            "transport"
        );
        let store = UpdateError::from(StoreError::Rejected("full".into()));
        assert_eq!(store.kind(), "store");
    }

    #[test]
    fn test_error_display() {
        let err = UpdateError::InvalidNumber {
            field: "price".into(),
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "Invalid number for price: \"abc\"");

        let err = UpdateError::from(StoreError::Rejected("disk full".into()));
        assert_eq!(err.to_string(), "Insert rejected: disk full");
    }
}

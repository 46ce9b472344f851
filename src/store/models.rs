//! Stored record types

use super::StoreConnection;
use crate::error::StoreError;
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Secondary asset price expressed in BTC and USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangePrice {
    pub btc: f64,
    pub usd: f64,
}

impl ExchangePrice {
    /// Derive the USD price from a BTC quote and the USD/BTC rate
    pub fn from_btc(btc: f64, usd_per_btc: f64) -> Self {
        Self {
            btc,
            usd: usd_per_btc * btc,
        }
    }
}

/// One price snapshot, written once per update cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// USD value of 1 BTC
    pub usd_per_btc: f64,
    /// Secondary asset quote
    pub secondary: ExchangePrice,
    /// Minute the snapshot belongs to (UTC, seconds zeroed)
    pub generated_at: DateTime<Utc>,
    /// Change of `usd_per_btc` against the previous record, in percent.
    /// `None` when there is nothing to compare against.
    pub percent_change: Option<f64>,
}

impl PriceRecord {
    /// Build a record stamped with the minute containing `now`
    pub fn new(usd_per_btc: f64, secondary_btc: f64, now: DateTime<Utc>) -> Self {
        Self {
            usd_per_btc,
            secondary: ExchangePrice::from_btc(secondary_btc, usd_per_btc),
            generated_at: truncate_to_minute(now),
            percent_change: None,
        }
    }

    /// Compare against the most recent stored record and fill in
    /// `percent_change`
    pub fn set_percent_change(&mut self, conn: &dyn StoreConnection) -> Result<(), StoreError> {
        self.percent_change = conn
            .latest_price()?
            .and_then(|previous| percent_change(previous.usd_per_btc, self.usd_per_btc));
        Ok(())
    }
}

/// A feed item that has been persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPost {
    pub title: String,
    /// Label of the feed the post came from
    pub source: String,
    pub url: String,
    /// Feed-provided identifier, deduplication key within `source`
    pub unique_id: String,
    pub published_at: DateTime<Utc>,
}

/// Relative change from `previous` to `current`, in percent
///
/// Returns `None` when `previous` is zero or the result is not finite.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let change = (current - previous) / previous * 100.0;
    change.is_finite().then_some(change)
}

/// Zero the seconds and sub-second part of a timestamp
pub fn truncate_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    // Second 0 and nanosecond 0 are valid for every timestamp
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

//! Price updater
//!
//! Fetches USD/BTC and secondary/BTC quotes, derives the secondary USD
//! price and stores one snapshot per call.

use super::Updater;
use crate::config::PriceConfig;
use crate::error::UpdateError;
use crate::quote::{ExchangeRateClient, MarketDataClient, QuoteSource};
use crate::store::{PriceRecord, Store};
use crate::telemetry;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;

/// Clock used to stamp records
pub type Clock = fn() -> DateTime<Utc>;

/// Stores a new [`PriceRecord`] on every update
pub struct PriceUpdater {
    usd_source: Box<dyn QuoteSource>,
    secondary_source: Box<dyn QuoteSource>,
    store: Arc<dyn Store>,
    clock: Clock,
}

impl PriceUpdater {
    /// Create an updater from explicit sources
    pub fn new(
        usd_source: Box<dyn QuoteSource>,
        secondary_source: Box<dyn QuoteSource>,
        store: Arc<dyn Store>,
    ) -> Self {
        Self {
            usd_source,
            secondary_source,
            store,
            clock: Utc::now,
        }
    }

    /// Create an updater talking to the endpoints in `config`
    pub fn from_config(config: &PriceConfig, client: Client, store: Arc<dyn Store>) -> Self {
        Self::new(
            Box::new(ExchangeRateClient::from_config(client.clone(), config)),
            Box::new(MarketDataClient::from_config(client, config)),
            store,
        )
    }

    /// Replace the wall clock
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Fetch, derive and store one snapshot, returning what was stored
    pub async fn update_price(&self) -> Result<PriceRecord, UpdateError> {
        let usd_per_btc = self.usd_source.fetch_quote().await?;
        let secondary_btc = self.secondary_source.fetch_quote().await?;

        let mut record = PriceRecord::new(usd_per_btc, secondary_btc, (self.clock)());

        let conn = self.store.connect()?;
        record.set_percent_change(conn.as_ref())?;
        conn.insert_price(&record)?;

        telemetry::record_inserts("price", 1);
        Ok(record)
    }
}

#[async_trait]
impl Updater for PriceUpdater {
    fn name(&self) -> &'static str {
        "price"
    }

    async fn update(&self) -> Result<(), UpdateError> {
        let record = self.update_price().await?;
        tracing::info!(
            usd_per_btc = record.usd_per_btc,
            secondary_btc = record.secondary.btc,
            secondary_usd = record.secondary.usd,
            percent_change = ?record.percent_change,
            generated_at = %record.generated_at,
            "Stored price"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Timelike};

    struct FixedQuote(f64);

    #[async_trait]
    impl QuoteSource for FixedQuote {
        async fn fetch_quote(&self) -> Result<f64, UpdateError> {
            Ok(self.0)
        }
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 34, 56)
            .unwrap()
            .with_nanosecond(789_000_000)
            .unwrap()
    }

    fn updater(usd: f64, btc: f64, store: &MemoryStore) -> PriceUpdater {
        PriceUpdater::new(
            Box::new(FixedQuote(usd)),
            Box::new(FixedQuote(btc)),
            Arc::new(store.clone()),
        )
        .with_clock(fixed_clock)
    }

    #[tokio::test]
    async fn test_update_price_returns_stored_record() {
        let store = MemoryStore::new();
        let record = updater(612.0, 0.00001234, &store).update_price().await.unwrap();

        assert_eq!(store.prices(), vec![record.clone()]);
        assert_eq!(record.secondary.usd, 612.0 * 0.00001234);
        assert_eq!(
            record.generated_at,
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 34, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_same_minute_inserts_twice() {
        let store = MemoryStore::new();
        let updater = updater(612.0, 0.00001234, &store);

        updater.update_price().await.unwrap();
        let second = updater.update_price().await.unwrap();

        assert_eq!(store.prices().len(), 2);
        assert_eq!(second.percent_change, Some(0.0));
    }

    #[test]
    fn test_updater_name() {
        let store = MemoryStore::new();
        assert_eq!(updater(1.0, 1.0, &store).name(), "price");
    }
}

//! Market-data client for the secondary asset
//!
//! The per-market endpoint is unreliable for thin markets, so the quote is
//! read from the full market-data dump: the most recent trade of the
//! configured pair.

use super::{parse_decimal, QuoteSource};
use crate::config::PriceConfig;
use crate::error::UpdateError;
use crate::http;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level market-data response
#[derive(Debug, Deserialize)]
struct MarketDataResponse {
    #[serde(rename = "return")]
    body: MarketDataBody,
}

/// Markets stay undecoded until one is selected, so an odd shape in an
/// unrelated market cannot fail the lookup
#[derive(Debug, Deserialize)]
struct MarketDataBody {
    markets: HashMap<String, serde_json::Value>,
}

/// One market inside the dump. Fields other than the trade list are ignored.
#[derive(Debug, Deserialize)]
struct MarketSummary {
    /// Newest trade first; the API sends `null` for markets without trades
    #[serde(rename = "recenttrades", default)]
    recent_trades: Option<Vec<RecentTrade>>,
}

#[derive(Debug, Deserialize)]
struct RecentTrade {
    price: String,
}

/// Client for the market-data API
pub struct MarketDataClient {
    client: Client,
    url: String,
    market_pair: String,
}

impl MarketDataClient {
    pub fn new(client: Client, url: impl Into<String>, market_pair: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            market_pair: market_pair.into(),
        }
    }

    /// Create a client for the endpoint and pair named in the config
    pub fn from_config(client: Client, config: &PriceConfig) -> Self {
        Self::new(
            client,
            config.market_data_url.clone(),
            config.market_pair.clone(),
        )
    }
}

#[async_trait]
impl QuoteSource for MarketDataClient {
    async fn fetch_quote(&self) -> Result<f64, UpdateError> {
        let body = http::get_bytes(&self.client, &self.url).await?;
        let btc = parse_market_data(&body, &self.market_pair)?;

        tracing::debug!(pair = %self.market_pair, price_btc = btc, "Market data quote");
        Ok(btc)
    }
}

/// Extract the latest trade price of `market_pair` from a market-data dump
pub fn parse_market_data(body: &[u8], market_pair: &str) -> Result<f64, UpdateError> {
    let json_error = |source| UpdateError::Json {
        context: "market data",
        source,
    };

    let mut response: MarketDataResponse = serde_json::from_slice(body).map_err(json_error)?;

    let market = response
        .body
        .markets
        .remove(market_pair)
        .ok_or_else(|| UpdateError::MissingMarket(market_pair.to_string()))?;
    let market: MarketSummary = serde_json::from_value(market).map_err(json_error)?;

    let latest = market
        .recent_trades
        .as_deref()
        .and_then(|trades| trades.first())
        .ok_or_else(|| UpdateError::NoRecentTrades(market_pair.to_string()))?;

    parse_decimal("price", &latest.price)
}

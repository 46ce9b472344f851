//! USD/BTC exchange-rate client
//!
//! The endpoint answers with a flat object of currency pairs to decimal
//! strings, e.g. `{"btc_to_usd": "612.37", "usd_to_btc": "0.00163", ...}`.

use super::{parse_decimal, QuoteSource};
use crate::config::PriceConfig;
use crate::error::UpdateError;
use crate::http;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;

/// Client for the exchange-rate API
pub struct ExchangeRateClient {
    client: Client,
    url: String,
    quote_field: String,
}

impl ExchangeRateClient {
    pub fn new(client: Client, url: impl Into<String>, quote_field: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            quote_field: quote_field.into(),
        }
    }

    /// Create a client for the endpoint and field named in the config
    pub fn from_config(client: Client, config: &PriceConfig) -> Self {
        Self::new(
            client,
            config.exchange_rate_url.clone(),
            config.quote_field.clone(),
        )
    }
}

#[async_trait]
impl QuoteSource for ExchangeRateClient {
    async fn fetch_quote(&self) -> Result<f64, UpdateError> {
        let body = http::get_bytes(&self.client, &self.url).await?;
        let usd = parse_exchange_rate(&body, &self.quote_field)?;

        tracing::debug!(usd_per_btc = usd, "Exchange rate quote");
        Ok(usd)
    }
}

/// Extract `quote_field` from an exchange-rate response body
pub fn parse_exchange_rate(body: &[u8], quote_field: &str) -> Result<f64, UpdateError> {
    let rates: HashMap<String, serde_json::Value> =
        serde_json::from_slice(body).map_err(|source| UpdateError::Json {
            context: "exchange rates",
            source,
        })?;

    let value = rates
        .get(quote_field)
        .ok_or_else(|| UpdateError::MissingField(quote_field.to_string()))?;

    match value.as_str() {
        Some(quote) => parse_decimal(quote_field, quote),
        None => Err(UpdateError::InvalidNumber {
            field: quote_field.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exchange_rate() {
        let body = br#"{"btc_to_usd": "612.37", "usd_to_btc": "0.001633"}"#;
        let usd = parse_exchange_rate(body, "btc_to_usd").unwrap();
        assert_eq!(usd, "612.37".parse::<f64>().unwrap());
    }

    #[test]
    fn test_parse_exchange_rate_other_field() {
        let body = br#"{"btc_to_usd": "612.37", "btc_to_eur": "450.10"}"#;
        assert_eq!(parse_exchange_rate(body, "btc_to_eur").unwrap(), 450.10);
    }

    #[test]
    fn test_parse_exchange_rate_non_numeric() {
        let body = br#"{"btc_to_usd": "n/a"}"#;
        let result = parse_exchange_rate(body, "btc_to_usd");
        assert!(matches!(result, Err(UpdateError::InvalidNumber { .. })));
    }

    #[test]
    fn test_parse_exchange_rate_numeric_json_value() {
        // The API always quotes as strings; a bare number is a shape change
        let body = br#"{"btc_to_usd": 612.37}"#;
        let result = parse_exchange_rate(body, "btc_to_usd");
        assert!(matches!(result, Err(UpdateError::InvalidNumber { .. })));
    }

    #[test]
    fn test_parse_exchange_rate_missing_field() {
        let body = br#"{"usd_to_btc": "0.001633"}"#;
        let result = parse_exchange_rate(body, "btc_to_usd");
        assert!(matches!(result, Err(UpdateError::MissingField(f)) if f == "btc_to_usd"));
    }

    #[test]
    fn test_parse_exchange_rate_malformed_json() {
        let result = parse_exchange_rate(b"<html>502 Bad Gateway</html>", "btc_to_usd");
        assert!(matches!(result, Err(UpdateError::Json { .. })));
    }

    #[test]
    fn test_client_from_config() {
        let config = PriceConfig::default();
        let client = ExchangeRateClient::from_config(Client::new(), &config);
        assert_eq!(client.url, config.exchange_rate_url);
        assert_eq!(client.quote_field, "btc_to_usd");
    }
}

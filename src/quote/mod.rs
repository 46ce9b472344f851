//! Quote sources
//!
//! Remote APIs that answer with a single price ratio per request.

mod exchange_rate;
mod market_data;

pub use exchange_rate::{parse_exchange_rate, ExchangeRateClient};
pub use market_data::{parse_market_data, MarketDataClient};

use crate::error::UpdateError;
use async_trait::async_trait;

/// Trait for anything that can produce one quote on demand
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the current quote
    async fn fetch_quote(&self) -> Result<f64, UpdateError>;
}

/// Parse a decimal string quote, rejecting anything that is not a finite
/// number
pub(crate) fn parse_decimal(field: &str, value: &str) -> Result<f64, UpdateError> {
    let invalid = || UpdateError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    };

    let parsed: f64 = value.parse().map_err(|_| invalid())?;
    if !parsed.is_finite() {
        return Err(invalid());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("price", "612.37").unwrap(), 612.37);
        assert_eq!(parse_decimal("price", "0.00001234").unwrap(), 0.00001234);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        for value in ["", "abc", "12.3.4", " 42 ", "42\n", "NaN", "inf", "-infinity"] {
            let result = parse_decimal("price", value);
            assert!(
                matches!(result, Err(UpdateError::InvalidNumber { .. })),
                "Should reject: {:?}",
                value
            );
        }
    }
}

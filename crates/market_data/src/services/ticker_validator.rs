use std::sync::Arc;

use common::models::{Region, ValidatedTicker};
use tracing::{info, warn};

use crate::traits::QuoteSource;

/// Confirms candidates have a tradeable price and a display name.
pub struct TickerValidator {
    source: Arc<dyn QuoteSource>,
}

impl TickerValidator {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self { source }
    }

    /// Returns at most `max_count` accepted tickers in input order. Scanning
    /// stops as soon as the cap is reached; lookup failures count as
    /// rejections.
    pub async fn validate(
        &self,
        symbols: &[String],
        region: Region,
        max_count: usize,
    ) -> Vec<ValidatedTicker> {
        let mut valid = Vec::with_capacity(max_count.min(symbols.len()));

        for symbol in symbols {
            if valid.len() >= max_count {
                break;
            }

            match self.source.quote_info(symbol).await {
                Ok(info) => match (info.price, info.display_name()) {
                    (Some(_), Some(name)) => {
                        info!("[{}] Validated: {} ({})", region, symbol, name);
                        valid.push(ValidatedTicker::new(symbol.as_str(), name));
                    }
                    _ => warn!("[{}] Skipping invalid symbol: {}", region, symbol),
                },
                Err(e) => warn!("[{}] Validation failed for {}: {:#}", region, symbol, e),
            }
        }

        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockQuoteSource;
    use anyhow::anyhow;
    use common::models::QuoteInfo;
    use mockall::predicate::eq;

    fn info(price: Option<f64>, long_name: Option<&str>, short_name: Option<&str>) -> QuoteInfo {
        QuoteInfo {
            price,
            long_name: long_name.map(String::from),
            short_name: short_name.map(String::from),
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_rejects_missing_price_name_and_errors() {
        let mut source = MockQuoteSource::new();
        source
            .expect_quote_info()
            .with(eq("AAPL"))
            .returning(|_| Ok(info(Some(150.0), Some("Apple Inc."), None)));
        source
            .expect_quote_info()
            .with(eq("NOPRICE"))
            .returning(|_| Ok(info(None, Some("No Price Corp"), None)));
        source
            .expect_quote_info()
            .with(eq("NONAME"))
            .returning(|_| Ok(info(Some(10.0), None, Some(""))));
        source
            .expect_quote_info()
            .with(eq("BROKEN"))
            .returning(|_| Err(anyhow!("connection reset")));
        source
            .expect_quote_info()
            .with(eq("MSFT"))
            .returning(|_| Ok(info(Some(400.0), None, Some("Microsoft"))));

        let validator = TickerValidator::new(Arc::new(source));
        let valid = validator
            .validate(
                &symbols(&["AAPL", "NOPRICE", "NONAME", "BROKEN", "MSFT"]),
                Region::Usa,
                12,
            )
            .await;

        assert_eq!(
            valid,
            vec![
                ValidatedTicker::new("AAPL", "Apple Inc."),
                ValidatedTicker::new("MSFT", "Microsoft"),
            ]
        );
    }

    #[tokio::test]
    async fn test_stops_scanning_at_max_count() {
        let mut source = MockQuoteSource::new();
        source
            .expect_quote_info()
            .with(eq("A"))
            .times(1)
            .returning(|_| Ok(info(Some(1.0), Some("A Corp"), None)));
        source
            .expect_quote_info()
            .with(eq("B"))
            .times(1)
            .returning(|_| Ok(info(Some(2.0), Some("B Corp"), None)));
        source.expect_quote_info().with(eq("C")).never();

        let validator = TickerValidator::new(Arc::new(source));
        let valid = validator
            .validate(&symbols(&["A", "B", "C"]), Region::India, 2)
            .await;

        assert_eq!(valid.len(), 2);
        assert_eq!(valid[1].symbol, "B");
    }

    #[tokio::test]
    async fn test_zero_max_count_examines_nothing() {
        let mut source = MockQuoteSource::new();
        source.expect_quote_info().never();

        let validator = TickerValidator::new(Arc::new(source));
        let valid = validator.validate(&symbols(&["A"]), Region::Usa, 0).await;

        assert!(valid.is_empty());
    }

    #[tokio::test]
    async fn test_output_is_subsequence_of_input() {
        let mut source = MockQuoteSource::new();
        source.expect_quote_info().returning(|symbol| {
            if symbol.len() % 2 == 0 {
                Ok(info(Some(1.0), Some(symbol), None))
            } else {
                Err(anyhow!("not found"))
            }
        });

        let input = symbols(&["AA", "B", "CC", "DDD", "EEEE", "F", "GG"]);
        let validator = TickerValidator::new(Arc::new(source));
        let valid = validator.validate(&input, Region::Usa, 3).await;

        let accepted: Vec<&str> = valid.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(accepted, ["AA", "CC", "EEEE"]);
    }
}

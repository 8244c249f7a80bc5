use async_trait::async_trait;
use common::models::{Bar, Interval, Period, QuoteInfo};

/// The narrow capability surface the report needs from a market data
/// provider.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Current price and display names for a symbol.
    async fn quote_info(&self, symbol: &str) -> anyhow::Result<QuoteInfo>;

    /// Price series for a symbol, oldest bar first.
    async fn history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> anyhow::Result<Vec<Bar>>;
}

use std::sync::Arc;

use anyhow::{Context, anyhow};
use common::models::{Bar, Interval, Period, PriceSnapshot, Region, SnapshotRow, ValidatedTicker};
use tracing::{error, info};

use crate::traits::QuoteSource;

/// Turns validated tickers into one report row each.
pub struct SnapshotBuilder {
    source: Arc<dyn QuoteSource>,
}

impl SnapshotBuilder {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self { source }
    }

    /// Same length and order as `validated`. A symbol whose data cannot be
    /// fetched or derived still yields an `Unavailable` row.
    pub async fn build(&self, validated: &[ValidatedTicker], region: Region) -> Vec<SnapshotRow> {
        let mut rows = Vec::with_capacity(validated.len());

        for ticker in validated {
            match self.snapshot(ticker, region).await {
                Ok(snapshot) => {
                    info!(
                        "Fetched {}: {:.2} (as of {})",
                        snapshot.symbol,
                        snapshot.latest_price,
                        snapshot.formatted_price_time()
                    );
                    rows.push(SnapshotRow::Priced(snapshot));
                }
                Err(e) => {
                    error!("Error fetching price for {}: {:#}", ticker.symbol, e);
                    rows.push(SnapshotRow::unavailable(ticker, region));
                }
            }
        }

        rows
    }

    async fn snapshot(
        &self,
        ticker: &ValidatedTicker,
        region: Region,
    ) -> anyhow::Result<PriceSnapshot> {
        let symbol = ticker.symbol.as_str();

        if region.uses_intraday() {
            let intraday = self
                .source
                .history(symbol, Period::OneDay, Interval::FiveMinutes)
                .await
                .context("intraday history")?;
            let latest = intraday
                .last()
                .ok_or_else(|| anyhow!("No intraday data available"))?;

            // Intraday bars do not reliably reach back into the prior session.
            let daily = self
                .source
                .history(symbol, Period::TwoDays, Interval::Daily)
                .await
                .context("daily history")?;
            let prev_close = previous_close(&daily);

            Ok(PriceSnapshot::derive(ticker, region, latest, prev_close))
        } else {
            let daily = self
                .source
                .history(symbol, Period::TwoDays, Interval::Daily)
                .await
                .context("daily history")?;
            let latest = daily
                .last()
                .ok_or_else(|| anyhow!("No daily data available"))?;

            Ok(PriceSnapshot::derive(ticker, region, latest, previous_close(&daily)))
        }
    }
}

/// Second-to-last daily close, when the series spans two sessions.
fn previous_close(daily: &[Bar]) -> Option<f64> {
    daily.len().checked_sub(2).map(|i| daily[i].close)
}

use anyhow::{anyhow, bail};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use common::models::{Bar, Interval, QuoteInfo};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartMeta {
    #[serde(rename(deserialize = "regularMarketPrice"))]
    pub regular_market_price: Option<f64>,
    #[serde(rename(deserialize = "longName"))]
    pub long_name: Option<String>,
    #[serde(rename(deserialize = "shortName"))]
    pub short_name: Option<String>,
    /// Exchange offset from UTC, in seconds.
    #[serde(default)]
    pub gmtoffset: i32,
}

#[derive(Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuoteSeries {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartResponse {
    /// Unwraps the single chart result, turning a provider error object into
    /// an error.
    pub fn into_result(self) -> anyhow::Result<ChartResult> {
        if let Some(err) = self.chart.error {
            bail!(
                "Yahoo chart error {}: {}",
                err.code,
                err.description.unwrap_or_default()
            );
        }

        self.chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.swap_remove(0))
                }
            })
            .ok_or_else(|| anyhow!("Yahoo chart response carried no result"))
    }
}

impl ChartResult {
    pub fn quote_info(&self) -> QuoteInfo {
        QuoteInfo {
            price: self.meta.regular_market_price,
            long_name: self.meta.long_name.clone(),
            short_name: self.meta.short_name.clone(),
        }
    }

    /// Bars in exchange-local time. Points without a close are gaps and are
    /// skipped. Daily bars are stamped at local midnight of their session
    /// rather than at the session open.
    pub fn bars(&self, interval: Interval) -> anyhow::Result<Vec<Bar>> {
        let offset = FixedOffset::east_opt(self.meta.gmtoffset)
            .ok_or_else(|| anyhow!("Invalid gmtoffset {}", self.meta.gmtoffset))?;

        let Some(series) = self.indicators.quote.first() else {
            return Ok(Vec::new());
        };

        let mut bars = Vec::with_capacity(self.timestamp.len());
        for (i, &ts) in self.timestamp.iter().enumerate() {
            let Some(close) = series.close.get(i).copied().flatten() else {
                continue;
            };

            let mut timestamp = DateTime::<Utc>::from_timestamp(ts, 0)
                .ok_or_else(|| anyhow!("Invalid bar timestamp {}", ts))?
                .with_timezone(&offset);
            if interval == Interval::Daily {
                timestamp = offset
                    .from_local_datetime(&timestamp.date_naive().and_time(NaiveTime::MIN))
                    .single()
                    .ok_or_else(|| anyhow!("Ambiguous session date for bar {}", ts))?;
            }

            bars.push(Bar {
                timestamp,
                open: series.open.get(i).copied().flatten(),
                high: series.high.get(i).copied().flatten(),
                low: series.low.get(i).copied().flatten(),
                close,
                volume: series.volume.get(i).copied().flatten(),
            });
        }

        Ok(bars)
    }
}

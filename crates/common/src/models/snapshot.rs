use chrono::{DateTime, FixedOffset};

use super::{Bar, Region, ValidatedTicker};

/// Placeholder rendered for any value the upstream data could not supply.
pub const NOT_AVAILABLE: &str = "N/A";

const PRICE_TIME_FORMAT: &str = "%Y-%m-%d %I:%M %p";

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub symbol: String,
    pub name: String,
    pub region: Region,
    pub latest_price: f64,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    pub price_time: DateTime<FixedOffset>,
}

impl PriceSnapshot {
    /// Derives day-over-day change from the latest bar and the previous
    /// session close. A zero previous close yields no percentage.
    pub fn derive(
        ticker: &ValidatedTicker,
        region: Region,
        latest: &Bar,
        previous_close: Option<f64>,
    ) -> Self {
        let change = previous_close.map(|prev| latest.close - prev);
        let change_pct = match (change, previous_close) {
            (Some(change), Some(prev)) if prev != 0.0 => Some(change / prev * 100.0),
            _ => None,
        };

        Self {
            symbol: ticker.symbol.clone(),
            name: ticker.name.clone(),
            region,
            latest_price: latest.close,
            previous_close,
            change,
            change_pct,
            price_time: latest.timestamp,
        }
    }

    pub fn formatted_price_time(&self) -> String {
        self.price_time.format(PRICE_TIME_FORMAT).to_string()
    }
}

/// Outcome of building one symbol's row. Both variants serialize to a full
/// report line.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotRow {
    Priced(PriceSnapshot),
    Unavailable {
        symbol: String,
        name: String,
        region: Region,
    },
}

impl SnapshotRow {
    pub fn unavailable(ticker: &ValidatedTicker, region: Region) -> Self {
        Self::Unavailable {
            symbol: ticker.symbol.clone(),
            name: ticker.name.clone(),
            region,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Priced(s) => &s.symbol,
            Self::Unavailable { symbol, .. } => symbol,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Priced(s) => &s.name,
            Self::Unavailable { name, .. } => name,
        }
    }

    pub fn region(&self) -> Region {
        match self {
            Self::Priced(s) => s.region,
            Self::Unavailable { region, .. } => *region,
        }
    }

    pub fn is_priced(&self) -> bool {
        matches!(self, Self::Priced(_))
    }

    /// Columns in report order: symbol, name, price, previous close, change,
    /// change %, latest price date.
    pub fn to_record(&self) -> [String; 7] {
        match self {
            Self::Priced(s) => [
                s.symbol.clone(),
                s.name.clone(),
                format!("{:.2}", s.latest_price),
                or_na(s.previous_close.map(|v| format!("{:.2}", v))),
                or_na(s.change.map(|v| format!("{:+.2}", v))),
                or_na(s.change_pct.map(|v| format!("{:+.2}%", v))),
                s.formatted_price_time(),
            ],
            Self::Unavailable { symbol, name, .. } => [
                symbol.clone(),
                name.clone(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
                NOT_AVAILABLE.to_string(),
            ],
        }
    }
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

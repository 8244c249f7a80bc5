use chrono::{DateTime, FixedOffset};

/// One OHLC point of a price series, stamped in exchange-local time.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<FixedOffset>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Bar {
    pub fn from_close(timestamp: DateTime<FixedOffset>, close: f64) -> Self {
        Self {
            timestamp,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// Lookback window of a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    OneDay,
    TwoDays,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::TwoDays => "2d",
        }
    }
}

/// Bar granularity of a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    FiveMinutes,
    Daily,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiveMinutes => "5m",
            Self::Daily => "1d",
        }
    }
}

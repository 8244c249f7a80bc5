use std::env;
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::tickers::{NIFTY50_TICKERS, SP500_TICKERS, to_owned_list};

pub const TOP_N_RANGE: RangeInclusive<usize> = 12..=18;

const DEFAULT_TOP_N: usize = 12;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MESSAGE: &str = "Here is today's stock report!";
const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error(
        "TOP_N must be within {min}..={max}, got {0}",
        min = TOP_N_RANGE.start(),
        max = TOP_N_RANGE.end()
    )]
    TopNOutOfRange(usize),
    #[error("{0} resolved to an empty ticker list")]
    EmptyTickerList(&'static str),
}

/// Process-wide settings, read once at startup and handed to the services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub webhook_url: Option<String>,
    pub webhook_message: String,
    pub top_n: usize,
    pub india_tickers: Vec<String>,
    pub usa_tickers: Vec<String>,
    pub report_dir: PathBuf,
    pub http_timeout: Duration,
    pub yahoo_base_url: String,
    pub server_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let top_n = match get("TOP_N") {
            Some(raw) => parse_value("TOP_N", &raw)?,
            None => DEFAULT_TOP_N,
        };
        if !TOP_N_RANGE.contains(&top_n) {
            return Err(ConfigError::TopNOutOfRange(top_n));
        }

        let india_tickers = match get("INDIA_TICKERS") {
            Some(raw) => split_tickers("INDIA_TICKERS", &raw)?,
            None => to_owned_list(NIFTY50_TICKERS),
        };
        let usa_tickers = match get("USA_TICKERS") {
            Some(raw) => split_tickers("USA_TICKERS", &raw)?,
            None => to_owned_list(SP500_TICKERS),
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_value("HTTP_TIMEOUT_SECS", &raw)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let server_addr = parse_value(
            "SERVER_ADDR",
            &get("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
        )?;

        Ok(Self {
            webhook_url: get("DISCORD_WEBHOOK_URL"),
            webhook_message: get("WEBHOOK_MESSAGE").unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            top_n,
            india_tickers,
            usa_tickers,
            report_dir: get("REPORT_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
            http_timeout,
            yahoo_base_url: get("YAHOO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YAHOO_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            server_addr,
        })
    }

    pub fn india_candidates(&self) -> &[String] {
        &self.india_tickers[..self.top_n.min(self.india_tickers.len())]
    }

    pub fn usa_candidates(&self) -> &[String] {
        &self.usa_tickers[..self.top_n.min(self.usa_tickers.len())]
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn split_tickers(key: &'static str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let tickers: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();

    if tickers.is_empty() {
        return Err(ConfigError::EmptyTickerList(key));
    }
    Ok(tickers)
}

pub mod config;
pub mod logger;
pub mod models;
pub mod tickers;

pub use config::{AppConfig, ConfigError};

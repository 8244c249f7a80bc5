use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use common::AppConfig;
use common::models::{Bar, Interval, Period, QuoteInfo};
use reqwest::{Client, Url};
use tracing::debug;

use crate::remote::chart_response::{ChartResponse, ChartResult};
use crate::traits::QuoteSource;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Quote source backed by the public Yahoo Finance chart endpoint.
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(config.yahoo_base_url.clone(), config.http_timeout)
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> anyhow::Result<ChartResult> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid quote source URL {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Quote source URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        debug!("GET {} range={} interval={}", url, range, interval);

        let response = self
            .client
            .get(url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await
            .with_context(|| format!("Request failed for {}", symbol))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("HTTP {} for {}: {}", status, symbol, body);
        }

        response
            .json::<ChartResponse>()
            .await
            .with_context(|| format!("Failed to parse chart JSON for {}", symbol))?
            .into_result()
    }
}

#[async_trait]
impl QuoteSource for YahooClient {
    async fn quote_info(&self, symbol: &str) -> anyhow::Result<QuoteInfo> {
        let chart = self
            .fetch_chart(symbol, Period::OneDay.as_str(), Interval::Daily.as_str())
            .await?;
        Ok(chart.quote_info())
    }

    async fn history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> anyhow::Result<Vec<Bar>> {
        let chart = self
            .fetch_chart(symbol, period.as_str(), interval.as_str())
            .await?;
        chart.bars(interval)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use axum::Router;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use common::models::{Region, ValidatedTicker};
    use serde_json::{Value, json};

    use super::*;
    use crate::services::SnapshotBuilder;

    fn chart_body(symbol: &str, params: &HashMap<String, String>) -> Value {
        let echo = format!(
            "{} {} {}",
            symbol,
            params.get("range").map(String::as_str).unwrap_or("-"),
            params.get("interval").map(String::as_str).unwrap_or("-"),
        );
        json!({
            "chart": {
                "result": [{
                    "meta": {
                        "regularMarketPrice": 2950.0,
                        "longName": echo,
                        "shortName": symbol,
                        "gmtoffset": 19800
                    },
                    "timestamp": [1748835900, 1748922300],
                    "indicators": {"quote": [{"close": [2900.0, 2950.0]}]}
                }],
                "error": null
            }
        })
    }

    async fn chart(
        Path(symbol): Path<String>,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, String) {
        if !params.contains_key("range") || !params.contains_key("interval") {
            return (StatusCode::BAD_REQUEST, "missing range or interval".into());
        }

        match symbol.as_str() {
            "DOWN" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable".into()),
            "DELISTED" => {
                let body = json!({
                    "chart": {
                        "result": null,
                        "error": {
                            "code": "Not Found",
                            "description": "No data found, symbol may be delisted"
                        }
                    }
                });
                (StatusCode::OK, body.to_string())
            }
            _ => (StatusCode::OK, chart_body(&symbol, &params).to_string()),
        }
    }

    async fn spawn_chart_server() -> String {
        let app = Router::new().route("/v8/finance/chart/{symbol}", get(chart));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn client(base_url: String) -> YahooClient {
        YahooClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_quote_info_requests_chart_path_and_query() {
        let yahoo = client(spawn_chart_server().await);

        let info = yahoo.quote_info("AAPL").await.unwrap();

        assert_eq!(info.price, Some(2950.0));
        assert_eq!(info.display_name(), Some("AAPL 1d 1d"));

        let info = yahoo.quote_info("TCS.NS").await.unwrap();
        assert_eq!(info.long_name.as_deref(), Some("TCS.NS 1d 1d"));
    }

    #[tokio::test]
    async fn test_symbols_with_punctuation_reach_the_server_intact() {
        let yahoo = client(spawn_chart_server().await);

        for symbol in ["M&M.NS", "BRK-B"] {
            let info = yahoo.quote_info(symbol).await.unwrap();
            assert_eq!(info.short_name.as_deref(), Some(symbol));
        }
    }

    #[tokio::test]
    async fn test_base_url_with_trailing_slash() {
        let base = format!("{}/", spawn_chart_server().await);
        let yahoo = client(base);

        let bars = yahoo
            .history("BRK-B", Period::OneDay, Interval::FiveMinutes)
            .await
            .unwrap();

        assert_eq!(bars.len(), 2);
    }

    #[tokio::test]
    async fn test_intraday_history_keeps_session_time() {
        let yahoo = client(spawn_chart_server().await);

        let bars = yahoo
            .history("TCS.NS", Period::OneDay, Interval::FiveMinutes)
            .await
            .unwrap();

        assert_eq!(
            bars[1].timestamp.format("%Y-%m-%d %I:%M %p").to_string(),
            "2025-06-03 09:15 AM"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let yahoo = client(spawn_chart_server().await);

        let err = yahoo.quote_info("DOWN").await.unwrap_err();

        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("DOWN"));
    }

    #[tokio::test]
    async fn test_chart_error_body_is_error() {
        let yahoo = client(spawn_chart_server().await);

        let err = yahoo
            .history("DELISTED", Period::TwoDays, Interval::Daily)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn test_india_daily_snapshot_dated_at_session_midnight() {
        let yahoo = client(spawn_chart_server().await);
        let builder = SnapshotBuilder::new(Arc::new(yahoo));
        let validated = vec![ValidatedTicker::new("RELIANCE.NS", "Reliance Industries")];

        let rows = builder.build(&validated, Region::India).await;

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].to_record(),
            [
                "RELIANCE.NS",
                "Reliance Industries",
                "2950.00",
                "2900.00",
                "+50.00",
                "+1.72%",
                "2025-06-03 12:00 AM",
            ]
        );
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use common::AppConfig;
use common::models::Region;
use market_data::QuoteSource;
use market_data::remote::YahooClient;
use market_data::services::{SnapshotBuilder, TickerValidator};
use tracing::{error, info};

use crate::error::GenerationError;
use crate::services::webhook_service::{Notifier, WebhookService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    pub path: PathBuf,
    pub file_name: String,
}

/// One full generation cycle: validate, snapshot, serialize, deliver.
pub struct ReportService {
    config: Arc<AppConfig>,
    validator: TickerValidator,
    builder: SnapshotBuilder,
    notifier: Arc<dyn Notifier>,
}

impl ReportService {
    pub fn new(
        config: Arc<AppConfig>,
        source: Arc<dyn QuoteSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            validator: TickerValidator::new(source.clone()),
            builder: SnapshotBuilder::new(source),
            notifier,
        }
    }

    /// Wires the Yahoo quote source and the webhook sink from configuration.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let source = Arc::new(YahooClient::from_config(&config)?);
        let notifier = Arc::new(WebhookService::from_config(&config)?);
        Ok(Self::new(config, source, notifier))
    }

    /// Runs the pipeline and swallows the failure after logging it. `None`
    /// means no report was produced.
    pub async fn run(&self) -> Option<GeneratedReport> {
        match self.generate().await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("CRITICAL: report generation crashed: {}", e);
                None
            }
        }
    }

    pub async fn generate(&self) -> Result<GeneratedReport, GenerationError> {
        self.generate_on(Local::now().date_naive()).await
    }

    pub async fn generate_on(&self, date: NaiveDate) -> Result<GeneratedReport, GenerationError> {
        let top_n = self.config.top_n;
        let india_symbols = self.config.india_candidates();
        let usa_symbols = self.config.usa_candidates();

        info!("India symbols: {:?}", india_symbols);
        info!("USA symbols: {:?}", usa_symbols);

        let india_valid = self.validator.validate(india_symbols, Region::India, top_n).await;
        let usa_valid = self.validator.validate(usa_symbols, Region::Usa, top_n).await;

        info!("Valid India tickers: {}", india_valid.len());
        info!("Valid USA tickers: {}", usa_valid.len());

        let india_rows = self.builder.build(&india_valid, Region::India).await;
        let usa_rows = self.builder.build(&usa_valid, Region::Usa).await;

        let path = storage::write_report(&self.config.report_dir, date, &usa_rows, &india_rows)?;
        let file_name = storage::report_file_name(date);

        info!(
            "[{}] CSV report generated: {}",
            Local::now().format("%I:%M %p"),
            path.display()
        );

        match self
            .notifier
            .send_report(&path, &self.config.webhook_message)
            .await
        {
            Ok(()) => info!("Report {} delivered", file_name),
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => error!("Failed to send CSV to webhook: {}", e),
        }

        Ok(GeneratedReport { path, file_name })
    }
}

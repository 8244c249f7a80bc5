use std::sync::Arc;

use anyhow::bail;
use common::{AppConfig, logger};
use dotenvy::dotenv;
use executor::ReportService;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();

    let config = Arc::new(AppConfig::from_env()?);
    info!(
        "Generating report for top {} tickers into {}",
        config.top_n,
        config.report_dir.display()
    );

    let service = ReportService::from_config(config)?;
    match service.run().await {
        Some(report) => {
            info!("Report ready: {}", report.path.display());
            Ok(())
        }
        None => bail!("Report generation failed"),
    }
}

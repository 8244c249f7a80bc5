use std::sync::Arc;

use common::{AppConfig, logger};
use dotenvy::dotenv;
use executor::ReportService;
use tracing::{info, warn};

use crate::router::{AppState, router};

mod router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();

    info!("System starting up...");
    let config = Arc::new(AppConfig::from_env()?);
    if config.webhook_url.is_none() {
        warn!("DISCORD_WEBHOOK_URL is not set; report generation will fail at delivery");
    }

    let addr = config.server_addr;
    let service = Arc::new(ReportService::from_config(config)?);
    let app = router(AppState { service });

    info!("Registering routes:");
    info!("  GET  /health");
    info!("  POST /generate-report");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

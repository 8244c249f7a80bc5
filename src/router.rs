use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use executor::{GenerationError, ReportService};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/generate-report", post(generate_report_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn generate_report_handler(State(state): State<AppState>) -> Response {
    let service = state.service.clone();

    // Spawned so a dropped connection does not cancel the in-flight run.
    let result = match tokio::spawn(async move { service.generate().await }).await {
        Ok(result) => result,
        Err(e) => Err(GenerationError::Task(e.to_string())),
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!("CRITICAL: report generation crashed: {}", e);
            return generation_failed();
        }
    };

    match tokio::fs::read(&report.path).await {
        Ok(bytes) => {
            info!("Serving {} ({} bytes)", report.file_name, bytes.len());
            (
                StatusCode::OK,
                [
                    (CONTENT_TYPE, "text/csv".to_string()),
                    (
                        CONTENT_DISPOSITION,
                        format!("attachment; filename={}", report.file_name),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!("Report {} missing after generation: {}", report.path.display(), e);
            generation_failed()
        }
    }
}

fn generation_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Report generation failed" })),
    )
        .into_response()
}

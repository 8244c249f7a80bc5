use storage::ReportError;
use thiserror::Error;

use crate::services::webhook_service::NotifyError;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to write report: {0}")]
    Report(#[from] ReportError),
    #[error("Failed to deliver report: {0}")]
    Delivery(#[from] NotifyError),
    #[error("Generation task failed: {0}")]
    Task(String),
}

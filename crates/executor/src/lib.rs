pub mod error;
pub mod services;

pub use error::GenerationError;
pub use services::report_service::{GeneratedReport, ReportService};
pub use services::webhook_service::{Notifier, NotifyError, WebhookService};

#[cfg(any(test, feature = "mocks"))]
pub use services::webhook_service::MockNotifier;

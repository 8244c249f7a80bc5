use std::io;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use common::AppConfig;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("DISCORD_WEBHOOK_URL not set in environment variables")]
    MissingWebhookUrl,
    #[error("Failed to read report file: {0}")]
    Io(#[from] io::Error),
    #[error("Webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Webhook rejected upload with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl NotifyError {
    /// Only a missing endpoint aborts generation; every other delivery
    /// failure leaves the written report usable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingWebhookUrl)
    }
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_report(&self, path: &Path, message: &str) -> Result<(), NotifyError>;
}

/// Uploads the report to a chat webhook as a multipart form with a `content`
/// text field and a `file` attachment.
pub struct WebhookService {
    client: Client,
    webhook_url: Option<String>,
}

impl WebhookService {
    pub fn new(client: Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build webhook HTTP client")?;
        Ok(Self::new(client, config.webhook_url.clone()))
    }
}

#[async_trait]
impl Notifier for WebhookService {
    async fn send_report(&self, path: &Path, message: &str) -> Result<(), NotifyError> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or(NotifyError::MissingWebhookUrl)?;

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report.csv".to_string());

        let part = Part::bytes(bytes).file_name(file_name).mime_str("text/csv")?;
        let form = Form::new()
            .text("content", message.to_string())
            .part("file", part);

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status().as_u16();

        if matches!(status, 200 | 204) {
            info!("CSV sent to webhook successfully.");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected { status, body })
    }
}

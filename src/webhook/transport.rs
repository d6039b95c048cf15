use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::error;

use crate::core::config::TransportSettings;
use crate::errors::RelayError;
use crate::utils::redact::loggable_webhook_url;

/// Sends one serialized JSON body to a webhook URL.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns a retryable `RelayError` when the request cannot be completed or
    /// the endpoint answers with a non-success status.
    async fn post_json(&self, url: &str, body: String) -> Result<(), RelayError>;
}

/// `WebhookTransport` backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: HttpClient,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::from_client(HttpClient::new())
    }

    #[must_use]
    pub fn from_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// # Errors
    ///
    /// Returns `RelayError::Config` if the HTTP client cannot be built.
    pub fn with_settings(settings: &TransportSettings) -> Result<Self, RelayError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| RelayError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::from_client(http_client))
    }
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<(), RelayError> {
        let resp = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!(
                webhook = %loggable_webhook_url(url),
                "Webhook POST failed: status={} body={}",
                status, body_text
            );
            return Err(RelayError::HttpStatus {
                status: status.as_u16(),
                body: body_text,
            });
        }

        Ok(())
    }
}

use tracing::{error, info, warn};

use crate::core::config::ConfigProvider;
use crate::core::models::{InboundEvent, OutboundEnvelope};
use crate::errors::RelayError;
use crate::utils::redact::loggable_webhook_url;
use crate::webhook::WebhookTransport;

/// Forwards inbound event payloads to the configured chat webhook.
///
/// Only transport failures are returned to the caller. A missing webhook URL
/// and a payload that cannot become a JSON envelope are logged and reported
/// as success, so the trigger infrastructure does not retry them.
pub struct RelayHandler<C, T> {
    config: C,
    transport: T,
}

impl<C, T> RelayHandler<C, T>
where
    C: ConfigProvider,
    T: WebhookTransport,
{
    #[must_use]
    pub fn new(config: C, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Relay a single event.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the webhook POST fails. This is the
    /// only outcome that should cause the invocation to be retried.
    pub async fn handle(&self, event: &InboundEvent) -> Result<(), RelayError> {
        info!(payload = %event.payload_lossy(), "Received message payload");

        let Some(url) = self.config.webhook_url() else {
            warn!("SLACK_WEBHOOK_URL is not set, dropping message");
            return Ok(());
        };

        let body = match OutboundEnvelope::from_event(event).and_then(|env| env.to_json()) {
            Ok(body) => body,
            Err(e) => {
                error!(
                    payload = %event.payload_lossy(),
                    "Failed to serialize message, dropping it: {}",
                    e
                );
                return Ok(());
            }
        };

        let webhook = loggable_webhook_url(&url);
        info!(webhook = %webhook, "Sending message to webhook");

        match self.transport.post_json(&url, body).await {
            Ok(()) => {
                info!(webhook = %webhook, "Message sent to webhook");
                Ok(())
            }
            Err(e) => {
                error!(
                    webhook = %webhook,
                    payload = %event.payload_lossy(),
                    "Failed to send message to webhook: {}",
                    e
                );
                Err(e)
            }
        }
    }
}

//! slack-relay - forwards event-notification payloads to a chat webhook.
//!
//! Each invocation receives one trigger event (Pub/Sub, SNS or SQS shaped),
//! wraps every message payload in a `{"text": ...}` envelope and POSTs it to
//! the webhook named by `SLACK_WEBHOOK_URL`.
//!
//! # Failure policy
//!
//! - Missing webhook URL: logged, reported as success.
//! - Payload that cannot become JSON text: logged, reported as success.
//! - Webhook unreachable or non-success status: reported as failure, so the
//!   trigger infrastructure may retry. The relay itself never retries.
//! - SQS batches report failed records through `batchItemFailures`, so
//!   records that were already delivered are not posted twice.
//!
//! The webhook URL is a secret. Log lines and surfaced errors carry at most
//! its scheme and host.
//!
//! # Example
//!
//! ```no_run
//! use slack_relay::core::config::EnvConfig;
//! use slack_relay::core::models::InboundEvent;
//! use slack_relay::relay::RelayHandler;
//! use slack_relay::webhook::ReqwestTransport;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     slack_relay::setup_logging();
//!
//!     let relay = RelayHandler::new(EnvConfig, ReqwestTransport::new());
//!     relay.handle(&InboundEvent::from("deploy finished")).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod relay;
pub mod trigger;
pub mod utils;
pub mod webhook;

/// Configure structured logging with JSON format for serverless log ingestion.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// slack_relay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

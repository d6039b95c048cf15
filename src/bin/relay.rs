use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use slack_relay::core::config::{ConfigProvider, EnvConfig, TransportSettings};
use slack_relay::relay::RelayHandler;
use slack_relay::trigger::function_handler;
use slack_relay::utils::redact::loggable_webhook_url;
use slack_relay::webhook::ReqwestTransport;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    slack_relay::setup_logging();

    let settings = TransportSettings::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let transport = ReqwestTransport::with_settings(&settings).map_err(|e| {
        error!("Failed to initialize HTTP transport: {}", e);
        Error::from(e)
    })?;

    match EnvConfig.webhook_url() {
        Some(url) => info!(
            webhook = %loggable_webhook_url(&url),
            timeout = ?settings.timeout,
            "Initializing relay"
        ),
        None => warn!("Initializing relay without SLACK_WEBHOOK_URL; messages will be dropped"),
    }

    let relay = Arc::new(RelayHandler::new(EnvConfig, transport));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let relay = Arc::clone(&relay);
        async move { function_handler(&relay, event).await }
    }))
    .await
}

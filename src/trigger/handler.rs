use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::parsing::{TriggerSource, decode_events};
use crate::core::config::ConfigProvider;
use crate::relay::RelayHandler;
use crate::webhook::WebhookTransport;

/// Lambda entry function: decode the trigger event and relay its messages.
///
/// Every decoded message gets exactly one delivery attempt. SQS records that
/// fail are listed in a `batchItemFailures` response so only they are
/// redelivered; the queue's event source mapping must enable
/// `ReportBatchItemFailures`. For any other source a delivery failure fails
/// the whole invocation.
///
/// # Errors
///
/// Returns an error when a message without a reportable SQS `messageId`
/// could not be delivered to the webhook, which tells the trigger
/// infrastructure to retry the invocation.
#[tracing::instrument(level = "info", skip(relay, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler<C, T>(
    relay: &RelayHandler<C, T>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error>
where
    C: ConfigProvider,
    T: WebhookTransport,
{
    let decoded = match decode_events(&event.payload) {
        Ok(decoded) => decoded,
        Err(e) => {
            error!(
                "Dropping undecodable trigger event: {} payload={}",
                e, event.payload
            );
            return Ok(Value::Null);
        }
    };
    for skipped in &decoded.skipped {
        warn!("Dropping undecodable record: {}", skipped);
    }
    info!(
        "Decoded {} message(s) from trigger event",
        decoded.messages.len()
    );

    let mut failed_items = Vec::new();
    let mut invocation_failure = None;
    for message in &decoded.messages {
        if let Err(e) = relay.handle(&message.event).await {
            match (message.source, &message.message_id) {
                (TriggerSource::Sqs, Some(id)) => failed_items.push(id.clone()),
                _ => invocation_failure = Some(e),
            }
        }
    }

    if let Some(e) = invocation_failure {
        return Err(Error::from(format!("Relay error: {e}")));
    }

    let from_sqs = decoded
        .messages
        .iter()
        .any(|m| m.source == TriggerSource::Sqs);
    if !from_sqs {
        return Ok(Value::Null);
    }

    if !failed_items.is_empty() {
        warn!(
            "{} of {} SQS records could not be delivered and will be retried",
            failed_items.len(),
            decoded.messages.len()
        );
    }
    let failures: Vec<Value> = failed_items
        .into_iter()
        .map(|id| json!({ "itemIdentifier": id }))
        .collect();
    Ok(json!({ "batchItemFailures": failures }))
}

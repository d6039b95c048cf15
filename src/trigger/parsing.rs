//! Decoding of trigger-infrastructure events into [`InboundEvent`]s.
//!
//! Recognized shapes:
//! - Pub/Sub push envelope: `{"message": {"data": "<base64>"}, "subscription": ...}`
//! - Bare Pub/Sub message: `{"data": "<base64>", "attributes": ...}`
//! - SNS notification: `{"Records": [{"Sns": {"Message": "..."}}]}`
//! - SQS batch: `{"Records": [{"messageId": "...", "body": "..."}]}`

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::InboundEvent;
use crate::errors::RelayError;

/// Delivery system a message arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    PubSub,
    Sns,
    Sqs,
}

/// One relayable message taken out of a trigger event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMessage {
    pub source: TriggerSource,
    /// SQS `messageId`, used to report a failed record back to the queue.
    pub message_id: Option<String>,
    pub event: InboundEvent,
}

/// Every message of a trigger event, plus the records that could not be read.
#[derive(Debug, Default)]
pub struct DecodedEvent {
    pub messages: Vec<TriggerMessage>,
    pub skipped: Vec<RelayError>,
}

/// Decode every message carried by a trigger event.
///
/// A malformed record inside a `Records` batch lands in `skipped` and does not
/// affect its neighbours.
///
/// # Errors
///
/// Returns `RelayError::Trigger` if the event matches none of the known
/// shapes or a Pub/Sub message cannot be decoded.
pub fn decode_events(payload: &Value) -> Result<DecodedEvent, RelayError> {
    if let Some(records) = payload.get("Records") {
        let records = records
            .as_array()
            .ok_or_else(|| RelayError::Trigger("`Records` is not an array".to_string()))?;

        let mut decoded = DecodedEvent::default();
        for (idx, record) in records.iter().enumerate() {
            match decode_record(idx, record) {
                Ok(message) => decoded.messages.push(message),
                Err(e) => decoded.skipped.push(e),
            }
        }
        return Ok(decoded);
    }

    let message = match payload.get("message") {
        Some(message) if message.is_object() => message,
        Some(_) => {
            return Err(RelayError::Trigger(
                "`message` is not an object".to_string(),
            ));
        }
        None if payload.get("data").is_some() => payload,
        None => {
            return Err(RelayError::Trigger(
                "event matches no known trigger shape".to_string(),
            ));
        }
    };

    Ok(DecodedEvent {
        messages: vec![TriggerMessage {
            source: TriggerSource::PubSub,
            message_id: None,
            event: decode_pubsub_message(message)?,
        }],
        skipped: Vec::new(),
    })
}

fn decode_record(idx: usize, record: &Value) -> Result<TriggerMessage, RelayError> {
    if let Some(message) = record
        .get("Sns")
        .and_then(|sns| sns.get("Message"))
        .and_then(|m| m.as_str())
    {
        return Ok(TriggerMessage {
            source: TriggerSource::Sns,
            message_id: None,
            event: InboundEvent::from(message),
        });
    }

    let body = record
        .get("body")
        .and_then(|body| body.as_str())
        .ok_or_else(|| {
            RelayError::Trigger(format!(
                "record {idx} has neither `Sns.Message` nor `body`"
            ))
        })?;

    Ok(TriggerMessage {
        source: TriggerSource::Sqs,
        message_id: record
            .get("messageId")
            .and_then(|id| id.as_str())
            .map(str::to_string),
        event: InboundEvent::from(body),
    })
}

fn decode_pubsub_message(message: &Value) -> Result<InboundEvent, RelayError> {
    match message.get("data") {
        None | Some(Value::Null) => Ok(InboundEvent::default()),
        Some(Value::String(encoded)) => STANDARD
            .decode(encoded.trim())
            .map(InboundEvent::new)
            .map_err(|e| RelayError::Trigger(format!("`data` is not valid base64: {e}"))),
        Some(_) => Err(RelayError::Trigger("`data` is not a string".to_string())),
    }
}

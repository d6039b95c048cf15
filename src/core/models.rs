use std::borrow::Cow;

use serde::Serialize;

use crate::errors::RelayError;

/// Raw payload handed over by the trigger infrastructure for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundEvent {
    data: Vec<u8>,
}

impl InboundEvent {
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload rendered for log lines; invalid UTF-8 sequences are replaced.
    #[must_use]
    pub fn payload_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl From<Vec<u8>> for InboundEvent {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for InboundEvent {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl From<&str> for InboundEvent {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes().to_vec())
    }
}

/// JSON body posted to the chat webhook: `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEnvelope {
    pub text: String,
}

impl OutboundEnvelope {
    /// # Errors
    ///
    /// Returns `RelayError::Serialization` when the payload is not valid UTF-8
    /// and therefore has no JSON string representation.
    pub fn from_event(event: &InboundEvent) -> Result<Self, RelayError> {
        let text = std::str::from_utf8(event.data()).map_err(|e| {
            RelayError::Serialization(format!("payload is not valid UTF-8: {e}"))
        })?;
        Ok(Self {
            text: text.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `RelayError::Serialization` if the JSON encoder fails.
    pub fn to_json(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}

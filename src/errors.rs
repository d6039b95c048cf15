use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to build webhook envelope: {0}")]
    Serialization(String),

    #[error("Failed to send HTTP request: {0}")]
    Transport(String),

    #[error("Webhook responded with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode trigger event: {0}")]
    Trigger(String),
}

impl RelayError {
    /// Whether the invoking trigger infrastructure should retry the invocation.
    ///
    /// Only failures talking to the webhook are transient; everything else
    /// would fail identically on every attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}

// reqwest's Display embeds the request URL, which carries the webhook secret.
impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        let error = error.without_url();
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        RelayError::Transport(message)
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(error: serde_json::Error) -> Self {
        RelayError::Serialization(error.to_string())
    }
}

use std::env;
use std::time::Duration;

use crate::errors::RelayError;

/// Environment variable holding the webhook destination.
pub const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";

/// Optional client-side timeout for the webhook POST, in whole seconds.
pub const WEBHOOK_TIMEOUT_VAR: &str = "WEBHOOK_TIMEOUT_SECS";

/// Source of the webhook destination URL.
///
/// Implementations must return `None` for an absent or blank value.
pub trait ConfigProvider: Send + Sync {
    fn webhook_url(&self) -> Option<String>;
}

/// Reads the webhook URL from the process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigProvider for EnvConfig {
    fn webhook_url(&self) -> Option<String> {
        env::var(WEBHOOK_URL_VAR).ok().and_then(non_blank)
    }
}

/// Fixed configuration, independent of process state.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    webhook_url: Option<String>,
}

impl StaticConfig {
    #[must_use]
    pub fn new(webhook_url: Option<String>) -> Self {
        Self { webhook_url }
    }

    #[must_use]
    pub fn with_url(url: &str) -> Self {
        Self::new(Some(url.to_string()))
    }

    #[must_use]
    pub fn unset() -> Self {
        Self::new(None)
    }
}

impl ConfigProvider for StaticConfig {
    fn webhook_url(&self) -> Option<String> {
        self.webhook_url.clone().and_then(non_blank)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// HTTP client settings resolved once at process start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportSettings {
    pub timeout: Option<Duration>,
}

impl TransportSettings {
    /// # Errors
    ///
    /// Returns `RelayError::Config` if `WEBHOOK_TIMEOUT_SECS` is set but is not
    /// a positive integer.
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_timeout_value(env::var(WEBHOOK_TIMEOUT_VAR).ok().as_deref())
    }

    /// # Errors
    ///
    /// Returns `RelayError::Config` for a value that is not a positive integer.
    pub fn from_timeout_value(value: Option<&str>) -> Result<Self, RelayError> {
        let timeout = match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    RelayError::Config(format!("{WEBHOOK_TIMEOUT_VAR}: {e}"))
                })?;
                if secs == 0 {
                    return Err(RelayError::Config(format!(
                        "{WEBHOOK_TIMEOUT_VAR}: must be greater than zero"
                    )));
                }
                Some(Duration::from_secs(secs))
            }
        };
        Ok(Self { timeout })
    }
}

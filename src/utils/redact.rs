//! Rendering of webhook URLs for log output.
//!
//! A chat webhook URL is a capability token: anyone holding the path can post
//! into the channel. Log lines carry only the scheme and host.

use url::Url;

/// Render `url` as `scheme://host/***`.
///
/// # Examples
///
/// ```
/// use slack_relay::utils::redact::redact_webhook_url;
///
/// assert_eq!(
///     redact_webhook_url("https://hooks.slack.com/services/T000/B000/XXXX"),
///     "https://hooks.slack.com/***"
/// );
/// ```
#[must_use]
pub fn redact_webhook_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}://{}/***", parsed.scheme(), host),
            None => format!("{}:***", parsed.scheme()),
        },
        Err(_) => "<invalid url>".to_string(),
    }
}

/// Form of the webhook URL that log lines use.
///
/// The full URL is only logged when the `debug-logs` feature is enabled.
#[must_use]
pub fn loggable_webhook_url(url: &str) -> String {
    #[cfg(feature = "debug-logs")]
    {
        url.to_string()
    }

    #[cfg(not(feature = "debug-logs"))]
    {
        redact_webhook_url(url)
    }
}

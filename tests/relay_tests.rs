use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use slack_relay::core::config::StaticConfig;
use slack_relay::core::models::InboundEvent;
use slack_relay::errors::RelayError;
use slack_relay::relay::RelayHandler;
use slack_relay::webhook::{ReqwestTransport, WebhookTransport};
use tracing_subscriber::fmt::MakeWriter;

const SECRET_WEBHOOK: &str = "http://127.0.0.1:9/services/T000/B000/SECRETTOKEN";

/// Records every POST and answers with a fixed outcome.
#[derive(Default)]
struct RecordingTransport {
    calls: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingTransport {
    fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookTransport for RecordingTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<(), RelayError> {
        self.calls.lock().unwrap().push((url.to_string(), body));
        if self.fail {
            Err(RelayError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[tokio::test]
async fn test_relays_payload_as_text_envelope() {
    let relay = RelayHandler::new(
        StaticConfig::with_url("https://hooks.example/abc"),
        RecordingTransport::default(),
    );

    relay
        .handle(&InboundEvent::from("hello world"))
        .await
        .unwrap();

    assert_eq!(
        relay.transport().calls(),
        vec![(
            "https://hooks.example/abc".to_string(),
            "{\"text\":\"hello world\"}".to_string()
        )]
    );
}

#[tokio::test]
async fn test_unset_url_is_a_successful_noop() {
    for config in [StaticConfig::unset(), StaticConfig::with_url("")] {
        let relay = RelayHandler::new(config, RecordingTransport::default());

        assert!(relay.handle(&InboundEvent::from("hello")).await.is_ok());
        assert!(relay.transport().calls().is_empty());
    }
}

#[tokio::test]
async fn test_unserializable_payload_is_dropped_without_error() {
    let relay = RelayHandler::new(
        StaticConfig::with_url("https://hooks.example/abc"),
        RecordingTransport::default(),
    );

    let result = relay
        .handle(&InboundEvent::new(vec![0xc3, 0x28, 0xa0, 0xa1]))
        .await;

    assert!(result.is_ok());
    assert!(relay.transport().calls().is_empty());
}

#[tokio::test]
async fn test_transport_failure_is_surfaced_after_one_attempt() {
    let relay = RelayHandler::new(
        StaticConfig::with_url("https://hooks.example/abc"),
        RecordingTransport::failing(),
    );

    let err = relay
        .handle(&InboundEvent::from("hello"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(relay.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_empty_payload_is_still_sent() {
    let relay = RelayHandler::new(
        StaticConfig::with_url("https://hooks.example/abc"),
        RecordingTransport::default(),
    );

    relay.handle(&InboundEvent::default()).await.unwrap();

    assert_eq!(relay.transport().calls()[0].1, "{\"text\":\"\"}");
}

#[tokio::test]
async fn test_unreachable_webhook_returns_failure() {
    // Nothing listens on the discard port on loopback.
    let relay = RelayHandler::new(
        StaticConfig::with_url("http://127.0.0.1:9/hook"),
        ReqwestTransport::new(),
    );

    let err = relay
        .handle(&InboundEvent::from("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Transport(_)));
}

#[tokio::test]
async fn test_malformed_webhook_url_returns_failure() {
    let relay = RelayHandler::new(
        StaticConfig::with_url("not a url"),
        ReqwestTransport::new(),
    );

    let err = relay
        .handle(&InboundEvent::from("hello"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_failed_delivery_keeps_webhook_secret_out_of_error() {
    let relay = RelayHandler::new(
        StaticConfig::with_url(SECRET_WEBHOOK),
        ReqwestTransport::new(),
    );

    let err = relay
        .handle(&InboundEvent::from("hello"))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, RelayError::Transport(_)));
    assert!(!message.contains("SECRETTOKEN"), "error leaked secret: {message}");
    assert!(!message.contains("/services/"), "error leaked path: {message}");
}

#[tokio::test]
async fn test_failed_delivery_keeps_webhook_secret_out_of_logs() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let relay = RelayHandler::new(
        StaticConfig::with_url(SECRET_WEBHOOK),
        ReqwestTransport::new(),
    );
    let result = relay.handle(&InboundEvent::from("hello")).await;

    let output = logs.contents();
    assert!(result.is_err());
    assert!(output.contains("Failed to send message to webhook"));
    assert!(output.contains("http://127.0.0.1/***"));
    assert!(!output.contains("SECRETTOKEN"), "logs leaked secret: {output}");
}

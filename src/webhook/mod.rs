//! Outbound HTTP to the chat webhook.

pub mod transport;

pub use transport::{ReqwestTransport, WebhookTransport};

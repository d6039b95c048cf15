//! Adapter between the trigger infrastructure and the relay handler.

pub mod handler;
pub mod parsing;

pub use handler::function_handler;
pub use parsing::{DecodedEvent, TriggerMessage, TriggerSource, decode_events};

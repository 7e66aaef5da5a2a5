//! Chat Webhook
//!
//! Inbound LINE events: signature check, event parsing, and per-event
//! dispatch through the entry pipeline.

pub mod dispatch;
pub mod events;
pub mod handlers;
pub mod signing;
pub mod types;

pub use dispatch::{handle_events, EventOutcome};
pub use events::{InboundEvent, WebhookBody};

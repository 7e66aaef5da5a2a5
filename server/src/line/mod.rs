//! LINE Reply Transport
//!
//! Sends confirmation and failure notices back to the chat sender.

pub mod client;

pub use client::{LineClient, OutgoingMessage};

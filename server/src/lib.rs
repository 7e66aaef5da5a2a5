//! Wordbook Server
//!
//! LINE webhook that turns a single-word message into a dictionary entry
//! generated by a language model and saved to a Notion database.

pub mod api;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod line;
pub mod notion;
pub mod retry;
pub mod webhook;

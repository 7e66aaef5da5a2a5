//! Notion Persistence
//!
//! Maps validated entries onto the dictionary database and writes them.

pub mod client;
pub mod mapping;
pub mod store;

pub use client::{NotionClient, PageRef};
pub use store::save_to_notion;

//! Dictionary Entry Generation
//!
//! Language-model client and the retry-wrapped entry builder.

pub mod builder;
pub mod openai;

pub use builder::build_entry;
pub use openai::OpenAiClient;

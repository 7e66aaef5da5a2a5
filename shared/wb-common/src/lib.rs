//! Wordbook Common Library
//!
//! The dictionary entry contract shared by the builder and the persistence
//! adapter: the validated [`Entry`] type and the JSON Schema handed to the
//! language model as a structured-output constraint.

pub mod entry;
pub mod schema;

pub use entry::{Entry, Example, ValidationError};
pub use schema::{entry_field_names, entry_json_schema, ENTRY_SCHEMA_NAME};

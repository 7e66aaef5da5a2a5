//! Structured-Output Schema
//!
//! JSON Schema for [`Entry`](crate::Entry), shaped for strict
//! schema-constrained generation: every property is listed as required and
//! optional fields are nullable instead of omittable. `null` deserializes to
//! `None`, so the strict output and [`Entry::parse`](crate::Entry::parse)
//! agree.

use serde_json::{json, Value};

/// Name under which the schema is registered with the model.
pub const ENTRY_SCHEMA_NAME: &str = "dictionary_entry";

/// JSON field names of an entry, in schema order.
pub const fn entry_field_names() -> &'static [&'static str] {
    &[
        "word",
        "phonetic",
        "partOfSpeech",
        "meanings",
        "etymology",
        "collocations",
        "examples",
        "cefrLevel",
        "synonyms",
        "sourceUrl",
    ]
}

fn nullable_string(description: &str) -> Value {
    json!({ "type": ["string", "null"], "description": description })
}

fn nullable_string_list(description: &str) -> Value {
    json!({
        "type": ["array", "null"],
        "items": { "type": "string" },
        "description": description
    })
}

/// Build the JSON Schema describing a dictionary entry.
pub fn entry_json_schema() -> Value {
    let example = json!({
        "type": "object",
        "properties": {
            "source": { "type": "string", "description": "Example sentence in English" },
            "translation": nullable_string("Japanese translation of the sentence"),
        },
        "required": ["source", "translation"],
        "additionalProperties": false
    });

    json!({
        "type": "object",
        "properties": {
            "word": { "type": "string", "description": "The headword" },
            "phonetic": nullable_string("IPA pronunciation"),
            "partOfSpeech": nullable_string_list("Parts of speech, e.g. noun, verb"),
            "meanings": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1,
                "description": "Definitions, most common first"
            },
            "etymology": nullable_string("Word origin"),
            "collocations": nullable_string_list("Common collocations"),
            "examples": {
                "type": ["array", "null"],
                "items": example,
                "minItems": 1,
                "maxItems": 3,
                "description": "One to three usage examples"
            },
            "cefrLevel": nullable_string("CEFR level from A1 to C2"),
            "synonyms": nullable_string_list("Synonyms"),
            "sourceUrl": nullable_string("Absolute URL of a reference dictionary page"),
        },
        "required": entry_field_names(),
        "additionalProperties": false
    })
}

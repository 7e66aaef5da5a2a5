//! Dictionary Entry Types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A validated dictionary record for one word.
///
/// Built once from the model output and consumed once by the persistence
/// adapter. Optional fields are `None` when the model omitted them or sent
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Headword, the trimmed text the user sent.
    #[validate(custom(function = "not_blank"))]
    pub word: String,
    /// Pronunciation, usually IPA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    /// Parts of speech (noun, verb, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<Vec<String>>,
    /// Definitions. Never empty.
    #[validate(length(min = 1, message = "meanings must contain at least one item"))]
    pub meanings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collocations: Option<Vec<String>>,
    /// Usage examples, between 1 and 3 when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 3, message = "examples must contain 1 to 3 items"))]
    pub examples: Option<Vec<Example>>,
    /// CEFR level (A1 .. C2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cefr_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    /// Reference URL for the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "sourceUrl must be a valid URL"))]
    pub source_url: Option<String>,
}

/// A usage example with an optional translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// Error returned when a candidate does not match the entry contract.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Wrong shape or types (missing required field, string where a list was expected, ...).
    #[error("entry has invalid shape: {0}")]
    Shape(#[from] serde_json::Error),

    /// Right shape but a rule failed (cardinality bounds, URL format, blank word).
    #[error("entry failed validation: {0}")]
    Rules(#[from] validator::ValidationErrors),
}

impl Entry {
    /// Parse and validate a candidate JSON value.
    pub fn parse(candidate: serde_json::Value) -> Result<Self, ValidationError> {
        let entry: Self = serde_json::from_value(candidate)?;
        entry.validate()?;
        Ok(entry)
    }

    /// Entry with only the required fields set. Handy for tests and fixtures.
    #[must_use]
    pub fn minimal(word: impl Into<String>, meanings: Vec<String>) -> Self {
        Self {
            word: word.into(),
            phonetic: None,
            part_of_speech: None,
            meanings,
            etymology: None,
            collocations: None,
            examples: None,
            cefr_level: None,
            synonyms: None,
            source_url: None,
        }
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("word must not be empty".into());
        return Err(err);
    }
    Ok(())
}

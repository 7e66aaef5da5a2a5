//! Entry Builder
//!
//! Asks the language model for a dictionary entry constrained to the entry
//! schema, then validates what comes back.

use serde_json::Value;
use tracing::{debug, instrument};
use wb_common::{entry_field_names, entry_json_schema, Entry, ENTRY_SCHEMA_NAME};

use super::openai::{ChatMessage, OpenAiClient, ResponseFormat};
use crate::api::AppState;
use crate::error::{PipelineError, Service};
use crate::retry::retry_with_backoff;

/// System instruction sent with every entry request.
pub fn system_prompt() -> String {
    format!(
        "You are a dictionary assistant for English learners whose first language is Japanese. \
         Given a single English word, produce one dictionary entry for it. \
         Respond with JSON only, using exactly these field names: {}. \
         Write meanings in Japanese, give example sentences in English with Japanese translations, \
         and do not add any prose outside the JSON object.",
        entry_field_names().join(", ")
    )
}

/// User instruction for one word.
pub fn user_prompt(word: &str) -> String {
    format!(
        "Create a dictionary entry for the word \"{word}\". \
         Fill in phonetic, partOfSpeech, etymology, collocations, up to three examples, \
         cefrLevel, synonyms and sourceUrl wherever they are available; use null otherwise."
    )
}

/// Build a validated entry for `word`, retrying per the configured policy.
///
/// Fails immediately with [`PipelineError::NotConfigured`] when no model
/// client exists. Transport errors, empty responses and validation errors are
/// all retried; the last one is returned.
#[instrument(skip(state))]
pub async fn build_entry(state: &AppState, word: &str) -> Result<Entry, PipelineError> {
    let client = state
        .openai
        .as_ref()
        .ok_or(PipelineError::NotConfigured(Service::OpenAi))?;

    let word = word.trim();
    let messages = [
        ChatMessage::system(system_prompt()),
        ChatMessage::user(user_prompt(word)),
    ];
    let format = ResponseFormat::strict_schema(ENTRY_SCHEMA_NAME, entry_json_schema());

    retry_with_backoff(&state.config.retry, "build_entry", || {
        request_entry(client, &messages, &format, word)
    })
    .await
}

/// One completion round trip: request, extract, parse, validate.
async fn request_entry(
    client: &OpenAiClient,
    messages: &[ChatMessage],
    format: &ResponseFormat,
    word: &str,
) -> Result<Entry, PipelineError> {
    let response = client.chat_completion(messages, format).await?;
    let content = response
        .first_content()
        .ok_or(PipelineError::EmptyResponse)?;

    let candidate: Value = serde_json::from_str(content).map_err(wb_common::ValidationError::from)?;
    let entry = parse_candidate(candidate, word)?;
    debug!(word = %entry.word, meanings = entry.meanings.len(), "Entry built");
    Ok(entry)
}

/// Pin the headword to the user's input, then validate.
fn parse_candidate(mut candidate: Value, word: &str) -> Result<Entry, PipelineError> {
    if let Some(obj) = candidate.as_object_mut() {
        obj.insert("word".into(), Value::String(word.to_string()));
    }
    Ok(Entry::parse(candidate)?)
}

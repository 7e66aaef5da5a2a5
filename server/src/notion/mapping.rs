//! Entry → Notion Payload Mapping
//!
//! Pure functions that turn an [`Entry`] into the page-creation and
//! block-append bodies. Only present fields produce properties; a `None`,
//! an empty list or a blank string leaves the property out entirely.

use serde_json::{json, Map, Value};
use wb_common::{Entry, Example};

/// Notion caps `text.content` at 2000 characters per rich-text object.
pub const RICH_TEXT_LIMIT: usize = 2000;

/// Database property names.
pub mod props {
    pub const WORD: &str = "Word";
    pub const PHONETIC: &str = "Phonetic";
    pub const PART_OF_SPEECH: &str = "Part of Speech";
    pub const MEANINGS: &str = "Meanings";
    pub const ETYMOLOGY: &str = "Etymology";
    pub const COLLOCATIONS: &str = "Collocations";
    pub const CEFR_LEVEL: &str = "CEFR Level";
    pub const SYNONYMS: &str = "Synonyms";
    pub const SOURCE_URL: &str = "Source URL";
}

/// Marker prefixed to each meaning.
const BULLET: &str = "• ";

/// Separator between an example and its translation.
const EM_DASH_SEPARATOR: &str = " — ";

/// Rich-text array for `content`, split into chunks Notion accepts.
pub fn rich_text(content: &str) -> Value {
    Value::Array(text_objects(content))
}

fn text_objects(content: &str) -> Vec<Value> {
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(RICH_TEXT_LIMIT)
        .map(|chunk| text_object(&chunk.iter().collect::<String>()))
        .collect()
}

fn text_object(content: &str) -> Value {
    json!({ "type": "text", "text": { "content": content } })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn present_list(values: Option<&Vec<String>>) -> Option<&[String]> {
    values.map(Vec::as_slice).filter(|v| !v.is_empty())
}

fn title_property(content: &str) -> Value {
    json!({ "title": rich_text(content) })
}

fn rich_text_property(content: &str) -> Value {
    json!({ "rich_text": rich_text(content) })
}

fn select_property(name: &str) -> Value {
    json!({ "select": { "name": name } })
}

fn multi_select_property(names: &[String]) -> Value {
    let options: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
    json!({ "multi_select": options })
}

fn url_property(url: &str) -> Value {
    json!({ "url": url })
}

/// Meanings as one bulleted line each.
pub fn format_meanings(meanings: &[String]) -> String {
    meanings
        .iter()
        .map(|m| format!("{BULLET}{m}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Page properties for `entry`, containing only fields that are present.
pub fn page_properties(entry: &Entry) -> Map<String, Value> {
    let candidates: [(&str, Option<Value>); 9] = [
        (props::WORD, Some(title_property(entry.word.trim()))),
        (
            props::PHONETIC,
            present(entry.phonetic.as_deref()).map(rich_text_property),
        ),
        (
            props::PART_OF_SPEECH,
            present_list(entry.part_of_speech.as_ref()).map(multi_select_property),
        ),
        (
            props::MEANINGS,
            Some(rich_text_property(&format_meanings(&entry.meanings))),
        ),
        (
            props::ETYMOLOGY,
            present(entry.etymology.as_deref()).map(rich_text_property),
        ),
        (
            props::COLLOCATIONS,
            present_list(entry.collocations.as_ref()).map(|c| rich_text_property(&c.join(", "))),
        ),
        (
            props::CEFR_LEVEL,
            present(entry.cefr_level.as_deref()).map(select_property),
        ),
        (
            props::SYNONYMS,
            present_list(entry.synonyms.as_ref()).map(|s| rich_text_property(&s.join(", "))),
        ),
        (
            props::SOURCE_URL,
            present(entry.source_url.as_deref()).map(url_property),
        ),
    ];

    candidates
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect()
}

/// Body for `POST /v1/pages`.
pub fn create_page_payload(database_id: &str, entry: &Entry) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": page_properties(entry),
    })
}

/// One bulleted list item for an example.
fn example_block(example: &Example) -> Value {
    let mut parts = text_objects(&example.source);
    if let Some(translation) = present(example.translation.as_deref()) {
        parts.extend(text_objects(&format!("{EM_DASH_SEPARATOR}{translation}")));
    }

    json!({
        "object": "block",
        "type": "bulleted_list_item",
        "bulleted_list_item": { "rich_text": parts },
    })
}

/// Child blocks for the page body; empty when the entry has no examples.
pub fn example_blocks(entry: &Entry) -> Vec<Value> {
    entry
        .examples
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(example_block)
        .collect()
}

/// Body for `PATCH /v1/blocks/{page_id}/children`, or `None` without examples.
pub fn append_blocks_payload(entry: &Entry) -> Option<Value> {
    let blocks = example_blocks(entry);
    if blocks.is_empty() {
        return None;
    }
    Some(json!({ "children": blocks }))
}

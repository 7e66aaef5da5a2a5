//! Event Dispatch
//!
//! Runs every event of a batch concurrently through build → save → reply.
//! A failing event is logged and answered with a generic notice; it never
//! affects its siblings or the batch result.

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use wb_common::Entry;

use super::events::InboundEvent;
use crate::api::AppState;
use crate::dictionary::build_entry;
use crate::error::PipelineError;
use crate::notion::save_to_notion;

/// Sent to the user when any stage of their event failed.
pub const FAILURE_MESSAGE: &str = "エラーが発生しました。もう一度お試しください。";

/// Confirmation sent after an entry was saved.
pub fn saved_message(word: &str) -> String {
    format!("「{word}」をNotionに保存しました。")
}

/// Terminal state of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not a text message, blank text, or an event that could not be decoded.
    Ignored,
    /// Entry saved (and confirmed, when replies are possible).
    Saved { word: String },
    /// Some stage failed; a failure notice was attempted.
    Failed,
}

/// Process a batch of raw events concurrently. Outcomes are in input order.
pub async fn handle_events(state: &AppState, events: &[Value]) -> Vec<EventOutcome> {
    join_all(events.iter().map(|raw| handle_raw_event(state, raw))).await
}

/// Decode one event; a malformed event is logged and skipped.
async fn handle_raw_event(state: &AppState, raw: &Value) -> EventOutcome {
    match InboundEvent::from_raw(raw) {
        Ok(event) => handle_event(state, &event).await,
        Err(e) => {
            warn!(
                kind = raw.get("type").and_then(serde_json::Value::as_str),
                error = %e,
                "Skipping malformed event"
            );
            EventOutcome::Ignored
        }
    }
}

/// Process one event, containing any failure.
#[instrument(skip_all, fields(kind = event.kind(), user_id = event.user_id()))]
pub async fn handle_event(state: &AppState, event: &InboundEvent) -> EventOutcome {
    let Some(word) = event.text() else {
        debug!("Ignoring non-text event");
        return EventOutcome::Ignored;
    };

    match process_word(state, word, event.reply_token()).await {
        Ok(entry) => {
            info!(word = %entry.word, "Event processed");
            EventOutcome::Saved { word: entry.word }
        }
        Err(e) => {
            error!(word, error = %e, "Failed to process event");
            notify_failure(state, event.reply_token()).await;
            EventOutcome::Failed
        }
    }
}

async fn process_word(
    state: &AppState,
    word: &str,
    reply_token: Option<&str>,
) -> Result<Entry, PipelineError> {
    let entry = build_entry(state, word).await?;
    save_to_notion(state, &entry).await?;

    if let (Some(line), Some(token)) = (state.line.as_ref(), reply_token) {
        line.reply_text(token, &saved_message(&entry.word)).await?;
    }

    Ok(entry)
}

/// Best-effort failure notice. Errors here are only logged.
async fn notify_failure(state: &AppState, reply_token: Option<&str>) {
    let (Some(line), Some(token)) = (state.line.as_ref(), reply_token) else {
        return;
    };

    if let Err(e) = line.reply_text(token, FAILURE_MESSAGE).await {
        warn!(error = %e, "Failed to send failure notice");
    }
}

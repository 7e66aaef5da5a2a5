//! Entry Persistence
//!
//! Writes an entry as a database page, then appends its examples to the page
//! body. Page creation and block append run under separate retry scopes: a
//! failed append is retried against the page that already exists, so it can
//! never produce a second page for the same entry.

use tracing::{info, instrument};
use wb_common::Entry;

use super::client::PageRef;
use super::mapping::{append_blocks_payload, create_page_payload};
use crate::api::AppState;
use crate::error::{PipelineError, Service};
use crate::retry::retry_with_backoff;

/// Save `entry` to the configured Notion database.
///
/// Fails immediately with [`PipelineError::NotConfigured`] when Notion
/// credentials were absent at startup.
#[instrument(skip(state, entry), fields(word = %entry.word))]
pub async fn save_to_notion(state: &AppState, entry: &Entry) -> Result<PageRef, PipelineError> {
    let client = state
        .notion
        .as_ref()
        .ok_or(PipelineError::NotConfigured(Service::Notion))?;
    let policy = &state.config.retry;

    let page_payload = create_page_payload(client.database_id(), entry);
    let page = retry_with_backoff(policy, "notion_create_page", || {
        client.create_page(&page_payload)
    })
    .await?;

    if let Some(blocks_payload) = append_blocks_payload(entry) {
        retry_with_backoff(policy, "notion_append_blocks", || {
            client.append_block_children(&page.id, &blocks_payload)
        })
        .await?;
    }

    info!(page_id = %page.id, "Entry saved to Notion");
    Ok(page)
}

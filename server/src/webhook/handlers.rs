//! Webhook HTTP Handler

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use bytes::Bytes;
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::dispatch::{handle_events, EventOutcome};
use super::events::WebhookBody;
use super::signing::{verify_signature, SIGNATURE_HEADER};
use super::types::WebhookError;
use crate::api::AppState;

/// Check the request signature when a channel secret is configured.
fn authenticate(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<(), WebhookError> {
    let Some(secret) = state.config.line_channel_secret.as_deref() else {
        return Ok(());
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;

    if !verify_signature(secret, body, signature) {
        return Err(WebhookError::InvalidSignature);
    }
    Ok(())
}

/// POST /webhook
///
/// Always answers 200 once the body is accepted; per-event failures are
/// reported to the sender, not to the platform.
#[instrument(skip_all, fields(body_len = body.len()))]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), WebhookError> {
    authenticate(&state, &headers, &body)?;

    let payload: WebhookBody = serde_json::from_slice(&body)?;
    let outcomes = handle_events(&state, &payload.events).await;

    let saved = outcomes
        .iter()
        .filter(|o| matches!(o, EventOutcome::Saved { .. }))
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, EventOutcome::Failed))
        .count();
    info!(
        events = outcomes.len(),
        saved,
        failed,
        "Webhook batch processed"
    );

    Ok((StatusCode::OK, Json(json!({ "status": "ok" }))))
}

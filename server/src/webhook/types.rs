//! Webhook Endpoint Errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failures of the webhook request itself, outside per-event processing.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Missing signature header")]
    MissingSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed webhook body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MissingSignature | Self::InvalidSignature => {
                tracing::warn!(error = %self, "Rejected webhook request");
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Self::MalformedBody(e) => {
                tracing::error!(error = %e, "Failed to parse webhook body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

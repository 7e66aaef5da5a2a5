//! API Router and Application State
//!
//! Central routing configuration and shared state.

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config, dictionary::OpenAiClient, line::LineClient, notion::NotionClient, webhook,
};

/// Shared application state.
///
/// Built once in `main` and cloned per request; every client is optional and
/// a missing one disables only its own capability.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Language-model client (optional)
    pub openai: Option<OpenAiClient>,
    /// Notion client (optional)
    pub notion: Option<NotionClient>,
    /// LINE reply client (optional)
    pub line: Option<LineClient>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        config: Config,
        openai: Option<OpenAiClient>,
        notion: Option<NotionClient>,
        line: Option<LineClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            openai,
            notion,
            line,
        }
    }

    /// Build state from configuration, constructing each client whose
    /// credentials are present.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let openai = build_client("OpenAI", config.has_openai(), || OpenAiClient::new(&config));
        let notion = build_client("Notion", config.has_notion(), || NotionClient::new(&config));
        let line = build_client("LINE", config.has_line(), || LineClient::new(&config));
        Self::new(config, openai, notion, line)
    }
}

fn build_client<T>(
    name: &str,
    configured: bool,
    build: impl FnOnce() -> anyhow::Result<T>,
) -> Option<T> {
    if !configured {
        tracing::warn!(service = name, "Credentials not configured, integration disabled");
        return None;
    }

    match build() {
        Ok(client) => {
            tracing::info!(service = name, "Client initialized");
            Some(client)
        }
        Err(e) => {
            tracing::warn!(service = name, "Client initialization failed: {:#}. Integration disabled.", e);
            None
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Chat platform webhook
        .route("/webhook", post(webhook::handlers::receive_webhook))
        // Middleware
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Whether entries can be generated
    openai: bool,
    /// Whether entries can be saved
    notion: bool,
    /// Whether replies can be sent
    line: bool,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        openai: state.openai.is_some(),
        notion: state.notion.is_some(),
        line: state.line.is_some(),
    })
}

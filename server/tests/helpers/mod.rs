//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending requests through the full axum router, and
//! `MockServices` which stands in for the three external APIs (`OpenAI`,
//! Notion, LINE) with `wiremock` servers.
//!
//! ## Retry Policy
//!
//! [`test_config`] uses a single attempt with no backoff so failure paths
//! finish immediately. Tests that exercise retries override `config.retry`.
#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wb_server::api::{create_router, AppState};
use wb_server::config::Config;
use wb_server::retry::RetryPolicy;
use wb_server::webhook::signing::{sign_payload, SIGNATURE_HEADER};
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Channel secret used to sign test webhook bodies.
pub const CHANNEL_SECRET: &str = "test-channel-secret";

// ============================================================================
// External service mocks
// ============================================================================

/// Mock servers for every external API.
pub struct MockServices {
    pub openai: MockServer,
    pub notion: MockServer,
    pub line: MockServer,
}

impl MockServices {
    /// Start all three mock servers.
    pub async fn start() -> Self {
        Self {
            openai: MockServer::start().await,
            notion: MockServer::start().await,
            line: MockServer::start().await,
        }
    }

    /// Bodies of all requests received on `path` by `server`.
    pub async fn bodies(server: &MockServer, request_path: &str) -> Vec<Value> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
            .collect()
    }

    /// Number of requests any mock server received.
    pub async fn total_requests(&self) -> usize {
        let mut total = 0;
        for server in [&self.openai, &self.notion, &self.line] {
            total += server.received_requests().await.unwrap_or_default().len();
        }
        total
    }

    /// LINE replies as `(replyToken, text)` pairs, in arrival order.
    pub async fn replies(&self) -> Vec<(String, String)> {
        Self::bodies(&self.line, "/v2/bot/message/reply")
            .await
            .iter()
            .map(|body| {
                (
                    body["replyToken"].as_str().unwrap_or_default().to_string(),
                    body["messages"][0]["text"].as_str().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }

    /// Reply text sent for `token`, if any.
    pub async fn reply_for(&self, token: &str) -> Option<String> {
        self.replies()
            .await
            .into_iter()
            .find(|(t, _)| t == token)
            .map(|(_, text)| text)
    }

    /// Answer completion requests mentioning `word` with `entry`.
    pub async fn mount_entry(&self, word: &str, entry: Value) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains(word))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&entry)))
            .mount(&self.openai)
            .await;
    }

    /// Accept every page creation, returning `page_id`.
    pub async fn mount_notion_ok(&self, page_id: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "object": "page", "id": page_id })),
            )
            .mount(&self.notion)
            .await;

        Mock::given(method("PATCH"))
            .and(path_regex(r"^/v1/blocks/[^/]+/children$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "object": "list" })))
            .mount(&self.notion)
            .await;
    }

    /// Accept every LINE reply.
    pub async fn mount_line_ok(&self) {
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&self.line)
            .await;
    }
}

/// Chat-completion response whose first choice carries `entry` as JSON text.
pub fn completion_body(entry: &Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": entry.to_string(), "refusal": null },
            "finish_reason": "stop"
        }]
    })
}

/// Minimal valid entry candidate for `word`.
pub fn entry_json(word: &str) -> Value {
    json!({
        "word": word,
        "phonetic": null,
        "partOfSpeech": ["adjective"],
        "meanings": [format!("meaning of {word}")],
        "etymology": null,
        "collocations": null,
        "examples": null,
        "cefrLevel": "B2",
        "synonyms": null,
        "sourceUrl": null
    })
}

/// Config with every integration pointed at `mocks`.
pub fn test_config(mocks: &MockServices) -> Config {
    Config {
        line_channel_secret: Some(CHANNEL_SECRET.into()),
        line_channel_access_token: Some("test-access-token".into()),
        line_api_base_url: mocks.line.uri(),
        openai_api_key: Some("sk-test".into()),
        openai_base_url: mocks.openai.uri(),
        notion_token: Some("ntn_test".into()),
        notion_database_id: Some("test-database".into()),
        notion_base_url: mocks.notion.uri(),
        retry: RetryPolicy::new(1, Duration::ZERO),
        ..Config::default_for_test()
    }
}

// ============================================================================
// Webhook payloads
// ============================================================================

/// A LINE text-message event.
pub fn text_event(reply_token: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "mode": "active",
        "timestamp": 1_700_000_000_000_u64,
        "replyToken": reply_token,
        "source": { "type": "user", "userId": "U0123456789" },
        "message": { "type": "text", "id": "1", "text": text }
    })
}

/// A LINE sticker-message event.
pub fn sticker_event(reply_token: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": reply_token,
        "source": { "type": "user", "userId": "U0123456789" },
        "message": { "type": "sticker", "id": "2", "packageId": "446", "stickerId": "1988" }
    })
}

/// Webhook body wrapping `events`.
pub fn webhook_body(events: Vec<Value>) -> Value {
    json!({ "destination": "Ubot", "events": events })
}

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Build the app from `config`, constructing clients like `main` does.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::from_config(config);
        let router = create_router(state.clone());
        Self { router, state }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// POST a webhook body signed with [`CHANNEL_SECRET`].
    pub async fn post_webhook(&self, body: &Value) -> Response<Body> {
        let raw = serde_json::to_vec(body).expect("serialize webhook body");
        let signature = sign_payload(CHANNEL_SECRET, &raw);
        let request = Self::request(Method::POST, "/webhook")
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(Body::from(raw))
            .expect("build request");
        self.oneshot(request).await
    }
}

/// Read a response body as JSON.
pub async fn body_to_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

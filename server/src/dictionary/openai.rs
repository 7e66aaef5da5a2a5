//! `OpenAI` Chat Completions Client
//!
//! Minimal client for schema-constrained chat completions.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{check_status, PipelineError, Service};

/// Request timeout for completion calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `OpenAI` client bound to one model.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// `response_format` constraining the output to a JSON Schema.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename = "json_schema")]
pub struct ResponseFormat {
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: serde_json::Value,
}

impl ResponseFormat {
    pub fn strict_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            json_schema: JsonSchemaFormat {
                name: name.into(),
                strict: true,
                schema,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    response_format: &'a ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
    /// Set instead of `content` when the model declines to answer.
    pub refusal: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if there is any non-blank content.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}

impl OpenAiClient {
    /// Create a new client from server configuration.
    ///
    /// Requires `OPENAI_API_KEY` (`config.has_openai()` must be true).
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .context("OPENAI_API_KEY is required")?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build OpenAI HTTP client")?;

        Ok(Self {
            http,
            api_key,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        })
    }

    /// POST /v1/chat/completions
    pub async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        response_format: &ResponseFormat,
    ) -> Result<ChatCompletionResponse, PipelineError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            response_format,
        };

        let resp = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::transport(Service::OpenAi, e))?;

        check_status(Service::OpenAi, resp)
            .await?
            .json()
            .await
            .map_err(|e| PipelineError::transport(Service::OpenAi, e))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_format_serializes_as_json_schema() {
        let format = ResponseFormat::strict_schema("dictionary_entry", json!({ "type": "object" }));
        let value = serde_json::to_value(&format).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "dictionary_entry",
                    "strict": true,
                    "schema": { "type": "object" }
                }
            })
        );
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let value = serde_json::to_value(ChatMessage::system("hi")).unwrap();
        assert_eq!(value, json!({ "role": "system", "content": "hi" }));
    }

    #[test]
    fn first_content_skips_missing_and_blank() {
        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": "{\"word\":\"x\"}" } }]
        }))
        .unwrap();
        assert_eq!(resp.first_content(), Some("{\"word\":\"x\"}"));

        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": null, "refusal": "no" } }]
        }))
        .unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": "  " } }]
        }))
        .unwrap();
        assert_eq!(resp.first_content(), None);
    }

    #[test]
    fn new_requires_api_key() {
        let config = Config::default_for_test();
        assert!(OpenAiClient::new(&config).is_err());

        let mut config = Config::default_for_test();
        config.openai_api_key = Some("sk-test".into());
        assert!(OpenAiClient::new(&config).is_ok());
    }
}

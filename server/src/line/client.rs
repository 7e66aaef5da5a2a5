//! LINE Messaging API Client
//!
//! Reply-to-sender keyed by the per-event reply token.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Config;
use crate::error::{check_status, PipelineError, Service};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// LINE reply client.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

/// Outgoing message object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingMessage {
    Text { text: String },
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: &'a [OutgoingMessage],
}

impl LineClient {
    /// Create a new reply client from server configuration.
    ///
    /// Requires both `LINE_CHANNEL_SECRET` and `LINE_CHANNEL_ACCESS_TOKEN`
    /// (`config.has_line()` must be true).
    pub fn new(config: &Config) -> Result<Self> {
        config
            .line_channel_secret
            .as_ref()
            .context("LINE_CHANNEL_SECRET is required")?;
        let access_token = config
            .line_channel_access_token
            .clone()
            .context("LINE_CHANNEL_ACCESS_TOKEN is required")?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build LINE HTTP client")?;

        Ok(Self {
            http,
            access_token,
            base_url: config.line_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST /v2/bot/message/reply
    pub async fn reply(
        &self,
        reply_token: &str,
        messages: &[OutgoingMessage],
    ) -> Result<(), PipelineError> {
        let resp = self
            .http
            .post(format!("{}/v2/bot/message/reply", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&ReplyRequest {
                reply_token,
                messages,
            })
            .send()
            .await
            .map_err(|e| PipelineError::transport(Service::Line, e))?;

        check_status(Service::Line, resp).await?;
        Ok(())
    }

    /// Reply with a single text message.
    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), PipelineError> {
        self.reply(reply_token, &[OutgoingMessage::text(text)]).await
    }
}

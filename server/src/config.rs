//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default language model for entry generation.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000")
    pub bind_address: String,

    /// LINE channel secret, used to verify webhook signatures (optional)
    pub line_channel_secret: Option<String>,

    /// LINE channel access token, used for replies (optional)
    pub line_channel_access_token: Option<String>,

    /// LINE Messaging API base URL
    pub line_api_base_url: String,

    /// `OpenAI` API key (optional)
    pub openai_api_key: Option<String>,

    /// Chat model used to build entries (default: `gpt-4o-mini`)
    pub openai_model: String,

    /// `OpenAI` API base URL
    pub openai_base_url: String,

    /// Notion integration token (optional)
    pub notion_token: Option<String>,

    /// Notion database that receives entries (optional)
    pub notion_database_id: Option<String>,

    /// Notion API base URL
    pub notion_base_url: String,

    /// Retry policy for model and Notion calls
    pub retry: RetryPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let bind_address = match env::var("BIND_ADDRESS") {
            Ok(addr) => addr,
            Err(_) => {
                let port: u16 = match env::var("PORT") {
                    Ok(port) => port.parse().context("PORT must be a valid port number")?,
                    Err(_) => 3000,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let defaults = RetryPolicy::default();
        let max_attempts: u32 = match env::var("RETRY_MAX_ATTEMPTS") {
            Ok(v) => v
                .parse()
                .context("RETRY_MAX_ATTEMPTS must be a non-negative integer")?,
            Err(_) => defaults.max_attempts,
        };
        let initial_delay = match env::var("RETRY_INITIAL_DELAY_MS") {
            Ok(v) => Duration::from_millis(
                v.parse()
                    .context("RETRY_INITIAL_DELAY_MS must be a number of milliseconds")?,
            ),
            Err(_) => defaults.initial_delay,
        };

        Ok(Self {
            bind_address,
            line_channel_secret: non_empty_var("LINE_CHANNEL_SECRET"),
            line_channel_access_token: non_empty_var("LINE_CHANNEL_ACCESS_TOKEN"),
            line_api_base_url: env::var("LINE_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.line.me".into()),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: non_empty_var("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            notion_token: non_empty_var("NOTION_TOKEN"),
            notion_database_id: non_empty_var("NOTION_DATABASE_ID"),
            notion_base_url: env::var("NOTION_BASE_URL")
                .unwrap_or_else(|_| "https://api.notion.com".into()),
            retry: RetryPolicy::new(max_attempts, initial_delay),
        })
    }

    /// Check if LINE replies are configured.
    #[must_use]
    pub const fn has_line(&self) -> bool {
        self.line_channel_secret.is_some() && self.line_channel_access_token.is_some()
    }

    /// Check if the language model is configured.
    #[must_use]
    pub const fn has_openai(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Check if Notion persistence is configured.
    #[must_use]
    pub const fn has_notion(&self) -> bool {
        self.notion_token.is_some() && self.notion_database_id.is_some()
    }

    /// Create a default configuration for testing.
    ///
    /// No credentials are set; tests fill in the integrations they exercise
    /// and point the base URLs at `wiremock` servers.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".into(),
            line_channel_secret: None,
            line_channel_access_token: None,
            line_api_base_url: "http://127.0.0.1:9".into(),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.into(),
            openai_base_url: "http://127.0.0.1:9".into(),
            notion_token: None,
            notion_database_id: None,
            notion_base_url: "http://127.0.0.1:9".into(),
            retry: RetryPolicy::new(1, Duration::ZERO),
        }
    }
}

/// Read an env var, treating an empty value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

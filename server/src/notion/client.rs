//! Notion API Client
//!
//! Page creation and block append against one preconfigured database.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{check_status, PipelineError, Service};

/// API version sent in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Notion client bound to the dictionary database.
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
    database_id: String,
}

/// Reference to a created page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageRef {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl NotionClient {
    /// Create a new client from server configuration.
    ///
    /// Requires `NOTION_TOKEN` and `NOTION_DATABASE_ID` (`config.has_notion()` must be true).
    pub fn new(config: &Config) -> Result<Self> {
        let token = config
            .notion_token
            .clone()
            .context("NOTION_TOKEN is required")?;
        let database_id = config
            .notion_database_id
            .clone()
            .context("NOTION_DATABASE_ID is required")?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build Notion HTTP client")?;

        Ok(Self {
            http,
            token,
            base_url: config.notion_base_url.trim_end_matches('/').to_string(),
            database_id,
        })
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
    }

    /// POST /v1/pages
    pub async fn create_page(&self, payload: &Value) -> Result<PageRef, PipelineError> {
        let resp = self
            .request(reqwest::Method::POST, "/v1/pages")
            .json(payload)
            .send()
            .await
            .map_err(|e| PipelineError::transport(Service::Notion, e))?;

        check_status(Service::Notion, resp)
            .await?
            .json()
            .await
            .map_err(|e| PipelineError::transport(Service::Notion, e))
    }

    /// PATCH /`v1/blocks/{block_id}/children`
    pub async fn append_block_children(
        &self,
        block_id: &str,
        payload: &Value,
    ) -> Result<(), PipelineError> {
        let resp = self
            .request(
                reqwest::Method::PATCH,
                &format!("/v1/blocks/{block_id}/children"),
            )
            .json(payload)
            .send()
            .await
            .map_err(|e| PipelineError::transport(Service::Notion, e))?;

        check_status(Service::Notion, resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_token_and_database() {
        let mut config = Config::default_for_test();
        config.notion_token = Some("ntn_test".into());
        assert!(NotionClient::new(&config).is_err());

        config.notion_database_id = Some("db-1".into());
        let client = NotionClient::new(&config).unwrap();
        assert_eq!(client.database_id(), "db-1");
    }

    #[test]
    fn page_ref_ignores_extra_fields() {
        let page: PageRef = serde_json::from_str(
            r#"{"object":"page","id":"abc","url":"https://www.notion.so/abc","properties":{}}"#,
        )
        .unwrap();
        assert_eq!(page.id, "abc");
        assert_eq!(page.url.as_deref(), Some("https://www.notion.so/abc"));
    }
}

//! Pipeline Error Types
//!
//! Errors raised while building, saving or replying for a single event. They
//! never leave the per-event boundary in the dispatcher.

use wb_common::ValidationError;

/// External service an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    OpenAi,
    Notion,
    Line,
}

impl Service {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Notion => "Notion",
            Self::Line => "LINE",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Model output did not match the entry schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network failure talking to an external service.
    #[error("{service} request failed: {source}")]
    Transport {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    /// External service answered with a non-success status.
    #[error("{service} returned HTTP {status}: {body}")]
    Api {
        service: Service,
        status: u16,
        body: String,
    },

    /// Required client was not configured at startup.
    #[error("{0} client is not initialized")]
    NotConfigured(Service),

    /// The model returned no content.
    #[error("empty response from language model")]
    EmptyResponse,
}

impl PipelineError {
    pub const fn transport(service: Service, source: reqwest::Error) -> Self {
        Self::Transport { service, source }
    }
}

/// Turn a non-success response into [`PipelineError::Api`], keeping a body preview.
pub async fn check_status(
    service: Service,
    resp: reqwest::Response,
) -> Result<reqwest::Response, PipelineError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let body: String = body.chars().take(500).collect();
    Err(PipelineError::Api {
        service,
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PipelineError::NotConfigured(Service::Notion);
        assert_eq!(err.to_string(), "Notion client is not initialized");

        let err = PipelineError::Api {
            service: Service::OpenAi,
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "OpenAI returned HTTP 429: rate limited");

        assert_eq!(
            PipelineError::EmptyResponse.to_string(),
            "empty response from language model"
        );
    }
}

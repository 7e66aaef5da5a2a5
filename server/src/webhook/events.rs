//! Inbound Webhook Events
//!
//! LINE delivers a batch of events per request. Only text messages are acted
//! upon; every other kind deserializes into an inert variant.
//!
//! Events stay raw JSON in [`WebhookBody`] and are decoded one by one, so a
//! malformed event cannot reject the rest of its batch.

use serde::Deserialize;
use serde_json::Value;

/// Request body posted by the chat platform.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    /// Bot user ID the events are addressed to.
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Value>,
}

/// One webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InboundEvent {
    /// A user sent a message.
    Message {
        #[serde(default)]
        reply_token: Option<String>,
        message: MessageContent,
        #[serde(default)]
        source: Option<EventSource>,
    },
    /// The bot was added as a friend.
    Follow {
        #[serde(default)]
        reply_token: Option<String>,
    },
    Unfollow,
    /// The bot joined a group or room.
    Join {
        #[serde(default)]
        reply_token: Option<String>,
    },
    Leave,
    Postback {
        #[serde(default)]
        reply_token: Option<String>,
    },
    /// Any event kind this service does not know about.
    #[serde(other)]
    Unknown,
}

/// Message payload of a `message` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    Text {
        #[serde(default)]
        id: Option<String>,
        text: String,
    },
    /// Stickers, images, audio, location, ...
    #[serde(other)]
    Other,
}

/// Who sent the event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl InboundEvent {
    /// Decode one raw event from a webhook batch.
    pub fn from_raw(raw: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    /// Event kind as sent on the wire.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Follow { .. } => "follow",
            Self::Unfollow => "unfollow",
            Self::Join { .. } => "join",
            Self::Leave => "leave",
            Self::Postback { .. } => "postback",
            Self::Unknown => "unknown",
        }
    }

    /// Reply token, when the event carries one.
    pub fn reply_token(&self) -> Option<&str> {
        match self {
            Self::Message { reply_token, .. }
            | Self::Follow { reply_token }
            | Self::Join { reply_token }
            | Self::Postback { reply_token } => reply_token.as_deref(),
            Self::Unfollow | Self::Leave | Self::Unknown => None,
        }
    }

    /// Trimmed text of a text message; `None` for anything else or blank text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Message {
                message: MessageContent::Text { text, .. },
                ..
            } => Some(text.trim()).filter(|t| !t.is_empty()),
            _ => None,
        }
    }

    /// Sender user ID, if known.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Message {
                source: Some(source),
                ..
            } => source.user_id.as_deref(),
            _ => None,
        }
    }
}

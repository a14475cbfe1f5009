use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reaction-added notification from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub id: Uuid,
    /// Channel name (e.g. "discord").
    pub channel: String,
    /// Platform-specific ID of the user who reacted.
    pub user_id: String,
    /// The reaction glyph as rendered text (e.g. "🇪🇸").
    pub emoji: String,
    /// Platform-specific conversation the reacted message lives in.
    pub channel_id: String,
    /// Platform-specific ID of the reacted message.
    pub message_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ReactionEvent {
    /// Build an event stamped with a fresh ID and the current time.
    pub fn new(
        channel: impl Into<String>,
        user_id: impl Into<String>,
        emoji: impl Into<String>,
        channel_id: impl Into<String>,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.into(),
            user_id: user_id.into(),
            emoji: emoji.into(),
            channel_id: channel_id.into(),
            message_id: message_id.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The message a reaction was added to, fetched fresh for every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMessage {
    pub id: String,
    pub channel_id: String,
    /// Text content. Empty for attachment-only or embed-only messages.
    pub text: String,
    /// Whether the author is a bot account.
    pub author_is_bot: bool,
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    /// Platform-specific conversation to post into.
    #[serde(default)]
    pub reply_target: Option<String>,
    /// When set, the message is posted as a reply to this message ID.
    #[serde(default)]
    pub reply_to: Option<String>,
}

impl OutgoingMessage {
    /// A plain message posted into a conversation.
    pub fn to_channel(channel_id: &str, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_target: Some(channel_id.to_string()),
            reply_to: None,
        }
    }

    /// A reply anchored to an existing message.
    pub fn reply(source: &SourceMessage, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_target: Some(source.channel_id.clone()),
            reply_to: Some(source.id.clone()),
        }
    }
}

/// Form fields sent to a LibreTranslate-compatible `/translate` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    pub q: String,
    pub source: String,
    pub target: String,
    pub format: String,
}

impl TranslationRequest {
    /// Plain-text request with source language auto-detection.
    pub fn auto(text: &str, target: &str) -> Self {
        Self {
            q: text.to_string(),
            source: "auto".to_string(),
            target: target.to_string(),
            format: "text".to_string(),
        }
    }
}

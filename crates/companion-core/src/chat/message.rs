//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageType {
    /// Message typed by the user.
    User,
    /// Reply produced by the companion.
    Bot,
}

/// A single message in a chat.
///
/// Messages are append-only: once stored they are never edited or removed
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Message content before the store assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub message_type: MessageType,
    pub content: String,
}

impl MessageDraft {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Bot,
            content: content.into(),
        }
    }

    pub fn into_message(self, id: String, timestamp: DateTime<Utc>) -> Message {
        Message {
            id,
            message_type: self.message_type,
            content: self.content,
            timestamp,
        }
    }
}

//! Chat domain model.

use super::message::Message;
use crate::catalog::SelectedCourse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when a chat is created without one.
pub const DEFAULT_CHAT_TITLE: &str = "New Chat";

/// A conversation tied to the courses that were selected when it started.
///
/// `course_context` is a point-in-time copy of the selection. It is private
/// and only readable through [`Chat::course_context`], so nothing can change
/// it after creation even if the live selection moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub chat_id: String,
    pub title: String,
    course_context: Vec<SelectedCourse>,
    pub messages: Vec<Message>,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Preview of the most recent message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
}

impl Chat {
    pub fn new(
        chat_id: impl Into<String>,
        title: impl Into<String>,
        course_context: Vec<SelectedCourse>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            title: title.into(),
            course_context,
            messages: Vec::new(),
            message_count: 0,
            created_at,
            last_activity: created_at,
            last_message: None,
        }
    }

    /// The courses selected when this chat was created.
    pub fn course_context(&self) -> &[SelectedCourse] {
        &self.course_context
    }

    pub fn course_ids(&self) -> Vec<&str> {
        self.course_context.iter().map(|c| c.id.as_str()).collect()
    }

    /// Appends a message and refreshes the denormalized preview fields.
    pub fn push_message(&mut self, message: Message) {
        self.last_activity = message.timestamp;
        self.last_message = Some(message.content.clone());
        self.messages.push(message);
        self.message_count = self.messages.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::MessageDraft;

    #[test]
    fn test_push_message_updates_preview() {
        let created = Utc::now();
        let mut chat = Chat::new(
            "chat_1",
            DEFAULT_CHAT_TITLE,
            vec![SelectedCourse::new("py101", "Python Fundamentals")],
            created,
        );

        let later = created + chrono::Duration::seconds(5);
        chat.push_message(MessageDraft::user("What is a list?").into_message("msg_1".into(), later));

        assert_eq!(chat.message_count, 1);
        assert_eq!(chat.last_activity, later);
        assert_eq!(chat.last_message.as_deref(), Some("What is a list?"));
        assert_eq!(chat.course_ids(), vec!["py101"]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let chat = Chat::new("chat_1", "Title", Vec::new(), Utc::now());
        let json = serde_json::to_value(&chat).unwrap();
        assert!(json.get("chatId").is_some());
        assert!(json.get("courseContext").is_some());
        assert!(json.get("lastMessage").is_none());
    }
}

//! Study notes kept alongside a chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

/// Tag attached to notes saved from a chat message.
pub const FROM_CHAT_TAG: &str = "from-chat";

/// Where a note came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoteSource {
    /// Saved from a chat message
    Chat,
    /// Typed by the user
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source: NoteSource,
    pub timestamp: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl Note {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: NoteSource,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            source,
            timestamp,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the note created by "save to notes" on a chat message.
    pub fn from_chat_message(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let title = format!("Chat Note - {}", timestamp.format("%Y-%m-%d"));
        Self::new(title, content, NoteSource::Chat, timestamp).with_tags([FROM_CHAT_TAG])
    }
}

/// Note list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum NoteFilter {
    #[default]
    All,
    Chat,
    Manual,
}

impl NoteFilter {
    pub fn accepts(&self, note: &Note) -> bool {
        match self {
            NoteFilter::All => true,
            NoteFilter::Chat => note.source == NoteSource::Chat,
            NoteFilter::Manual => note.source == NoteSource::Manual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_chat_note_title_and_tag() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 18, 10, 30, 0).unwrap();
        let note = Note::from_chat_message("Lists are mutable", ts);
        assert_eq!(note.title, "Chat Note - 2024-01-18");
        assert_eq!(note.source, NoteSource::Chat);
        assert_eq!(note.tags, vec![FROM_CHAT_TAG.to_string()]);
    }

    #[test]
    fn test_note_ids_are_unique() {
        let now = Utc::now();
        let a = Note::new("a", "b", NoteSource::Manual, now);
        let b = Note::new("a", "b", NoteSource::Manual, now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_filter() {
        let note = Note::new("t", "c", NoteSource::Manual, Utc::now());
        assert!(NoteFilter::All.accepts(&note));
        assert!(NoteFilter::Manual.accepts(&note));
        assert!(!NoteFilter::Chat.accepts(&note));
        assert_eq!("chat".parse::<NoteFilter>().unwrap(), NoteFilter::Chat);
    }
}

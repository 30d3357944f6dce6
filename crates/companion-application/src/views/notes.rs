//! Notes side panel.

use chrono::{DateTime, Utc};
use companion_core::panel::{Note, NoteFilter, NoteSource};
use companion_infrastructure::samples::sample_notes;

pub struct NotesView {
    notes: Vec<Note>,
    filter: NoteFilter,
    selected: Option<String>,
}

impl Default for NotesView {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesView {
    /// Seeded with the sample notes.
    pub fn new() -> Self {
        Self::with_notes(sample_notes())
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            filter: NoteFilter::default(),
            selected: None,
        }
    }

    /// Adds a manual note at the top of the list.
    pub fn add_note(&mut self, title: &str, content: &str, now: DateTime<Utc>) -> Option<String> {
        let (title, content) = (title.trim(), content.trim());
        if title.is_empty() || content.is_empty() {
            return None;
        }
        let note = Note::new(title, content, NoteSource::Manual, now);
        let id = note.id.clone();
        self.notes.insert(0, note);
        Some(id)
    }

    /// Saves a chat message as a note tagged `from-chat`.
    pub fn save_chat_message(&mut self, content: &str, now: DateTime<Utc>) -> String {
        let note = Note::from_chat_message(content, now);
        let id = note.id.clone();
        tracing::info!(note_id = %id, "[Notes] Saved chat message");
        self.notes.insert(0, note);
        id
    }

    pub fn filter(&self) -> NoteFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: NoteFilter) {
        self.filter = filter;
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| self.filter.accepts(n)).collect()
    }

    pub fn select(&mut self, note_id: &str) -> bool {
        if self.notes.iter().any(|n| n.id == note_id) {
            self.selected = Some(note_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Note> {
        let id = self.selected.as_deref()?;
        self.notes.iter().find(|n| n.id == id)
    }
}

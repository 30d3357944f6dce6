//! Chat history with course-context matching.
//!
//! A chat is tied to the courses that were selected when it started. Opening
//! a chat whose context differs from the live selection asks the user to
//! either switch back to the chat's courses or start a new chat.

use crate::store::WidgetStore;
use companion_core::catalog::SelectedCourse;
use companion_core::chat::{Chat, CourseMatch, has_overlap, is_exact_match};
use std::sync::Arc;
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum HistoryFilter {
    /// At least one shared course
    #[default]
    Related,
    /// Same set of courses
    Exact,
    All,
}

impl HistoryFilter {
    pub fn accepts(&self, chat: &Chat, selected_ids: &[&str]) -> bool {
        let context_ids = chat.course_ids();
        match self {
            HistoryFilter::Related => has_overlap(&context_ids, selected_ids),
            HistoryFilter::Exact => is_exact_match(&context_ids, selected_ids),
            HistoryFilter::All => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub chat: Chat,
    pub course_match: CourseMatch,
}

/// Shown when a chat's courses differ from the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisambiguationPrompt {
    pub chat_id: String,
    pub title: String,
    pub original_courses: Vec<SelectedCourse>,
    pub current_courses: Vec<SelectedCourse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryClick {
    /// Exact match; the chat is now current
    Opened(String),
    /// The user has to pick how to continue
    NeedsConfirmation(DisambiguationPrompt),
    /// No chat with that id
    Missing,
}

pub struct ChatHistoryView {
    store: Arc<WidgetStore>,
    filter: HistoryFilter,
    pending: Option<DisambiguationPrompt>,
}

impl ChatHistoryView {
    pub fn new(store: Arc<WidgetStore>) -> Self {
        Self {
            store,
            filter: HistoryFilter::default(),
            pending: None,
        }
    }

    pub fn filter(&self) -> HistoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: HistoryFilter) {
        self.filter = filter;
    }

    /// Chats passing the active filter, classified against the live selection.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.store.read(|state| {
            let selected = state.selected_course_ids();
            state
                .chats
                .iter()
                .filter(|chat| self.filter.accepts(chat, &selected))
                .map(|chat| HistoryEntry {
                    chat: chat.clone(),
                    course_match: chat.match_against(&selected),
                })
                .collect()
        })
    }

    /// Number of chats a filter tab would show.
    pub fn count(&self, filter: HistoryFilter) -> usize {
        self.store.read(|state| {
            let selected = state.selected_course_ids();
            state
                .chats
                .iter()
                .filter(|chat| filter.accepts(chat, &selected))
                .count()
        })
    }

    pub fn click(&mut self, chat_id: &str) -> HistoryClick {
        let found = self.store.read(|state| {
            let chat = state.find_chat(chat_id)?;
            let selected = state.selected_course_ids();
            Some((
                chat.match_against(&selected),
                DisambiguationPrompt {
                    chat_id: chat.chat_id.clone(),
                    title: chat.title.clone(),
                    original_courses: chat.course_context().to_vec(),
                    current_courses: state.selected_courses.clone(),
                },
            ))
        });

        match found {
            None => {
                // Let the store report the missing chat
                self.store.open_chat(chat_id, false);
                HistoryClick::Missing
            }
            Some((CourseMatch::Exact, _)) => {
                self.store.open_chat(chat_id, false);
                HistoryClick::Opened(chat_id.to_string())
            }
            Some((_, prompt)) => {
                self.pending = Some(prompt.clone());
                HistoryClick::NeedsConfirmation(prompt)
            }
        }
    }

    pub fn pending(&self) -> Option<&DisambiguationPrompt> {
        self.pending.as_ref()
    }

    /// Opens the pending chat and switches the selection to its courses.
    pub fn continue_with_original(&mut self) -> Option<String> {
        let prompt = self.pending.take()?;
        tracing::info!(chat_id = %prompt.chat_id, "[ChatHistory] Switching to original courses");
        self.store.open_chat(&prompt.chat_id, true);
        Some(prompt.chat_id)
    }

    /// Leaves the pending chat alone and starts a new one for the selection.
    pub fn start_new_with_current(&mut self) -> Option<String> {
        self.pending.take()?;
        self.store.create_new_chat(None)
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_infrastructure::samples::sample_chats;

    fn store_with(selection: &[(&str, &str)]) -> Arc<WidgetStore> {
        let store = Arc::new(WidgetStore::new());
        store.restore_chats(sample_chats());
        store.set_selected_courses(
            selection
                .iter()
                .map(|(id, name)| SelectedCourse::new(*id, *name))
                .collect(),
        );
        store
    }

    #[test]
    fn test_filter_counts() {
        let store = store_with(&[("py101", "Python Fundamentals"), ("cpp201", "C++ Advanced")]);
        let view = ChatHistoryView::new(store);
        assert_eq!(view.count(HistoryFilter::All), 4);
        assert_eq!(view.count(HistoryFilter::Related), 3);
        assert_eq!(view.count(HistoryFilter::Exact), 2);

        let entries = view.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].course_match, CourseMatch::Exact);
        assert_eq!(entries[1].course_match, CourseMatch::Partial);
    }

    #[test]
    fn test_exact_click_opens_directly() {
        let store = store_with(&[("cpp201", "C++ Advanced"), ("py101", "Python Fundamentals")]);
        let mut view = ChatHistoryView::new(Arc::clone(&store));
        assert_eq!(view.click("chat_001"), HistoryClick::Opened("chat_001".into()));
        assert_eq!(store.snapshot().current_chat_id.as_deref(), Some("chat_001"));
        assert!(view.pending().is_none());
    }

    #[test]
    fn test_partial_click_then_continue_with_original() {
        let store = store_with(&[("py101", "Python Fundamentals")]);
        let mut view = ChatHistoryView::new(Arc::clone(&store));

        let HistoryClick::NeedsConfirmation(prompt) = view.click("chat_002") else {
            panic!("expected a prompt");
        };
        assert_eq!(prompt.original_courses.len(), 2);
        assert_eq!(prompt.current_courses.len(), 1);
        assert!(store.snapshot().current_chat_id.is_none());

        assert_eq!(view.continue_with_original().as_deref(), Some("chat_002"));
        let state = store.snapshot();
        assert_eq!(state.current_chat_id.as_deref(), Some("chat_002"));
        assert_eq!(state.selected_course_ids(), vec!["devops301", "py101"]);
    }

    #[test]
    fn test_start_new_with_current_snapshots_selection() {
        let store = store_with(&[("ml401", "Machine Learning")]);
        let mut view = ChatHistoryView::new(Arc::clone(&store));
        view.set_filter(HistoryFilter::All);

        assert!(matches!(view.click("chat_001"), HistoryClick::NeedsConfirmation(_)));
        let chat_id = view.start_new_with_current().unwrap();

        let state = store.snapshot();
        assert_eq!(state.chats.len(), 5);
        assert_eq!(state.chats[0].chat_id, chat_id);
        assert_eq!(state.chats[0].course_ids(), vec!["ml401"]);
        assert_eq!(state.selected_course_ids(), vec!["ml401"]);
    }

    #[test]
    fn test_dismiss_and_missing() {
        let store = store_with(&[("py101", "Python Fundamentals")]);
        let mut view = ChatHistoryView::new(store);
        view.click("chat_004");
        assert!(view.pending().is_some());
        view.dismiss();
        assert!(view.continue_with_original().is_none());
        assert_eq!(view.click("chat_999"), HistoryClick::Missing);
    }
}

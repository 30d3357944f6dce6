//! Observable widget state store.

use chrono::Utc;
use companion_core::catalog::SelectedCourse;
use companion_core::chat::{Chat, MatchType, MessageDraft, chats_for_courses};
use companion_core::config::WidgetConfig;
use companion_core::state::{ActionOutcome, View, WidgetAction, WidgetState};
use companion_core::CompanionError;
use tokio::sync::watch;

/// Single owner of the widget state.
///
/// Every action is applied atomically inside the watch channel, and
/// subscribers are woken only when the action actually changed something.
/// Precondition violations never reach the caller: they are logged and the
/// state stays as it was.
pub struct WidgetStore {
    sender: watch::Sender<WidgetState>,
}

impl Default for WidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetStore {
    pub fn new() -> Self {
        Self::with_state(WidgetState::default())
    }

    pub fn with_state(state: WidgetState) -> Self {
        let (sender, _) = watch::channel(state);
        Self { sender }
    }

    /// Applies an action and returns its outcome, or `None` if it was rejected.
    pub fn dispatch(&self, action: WidgetAction) -> Option<ActionOutcome> {
        let name = action.as_ref().to_string();
        let mut result = None;

        self.sender.send_if_modified(|state| match state.apply(action, Utc::now()) {
            Ok(outcome) => {
                let changed = outcome.is_changed();
                result = Some(Ok(outcome));
                changed
            }
            Err(e) => {
                result = Some(Err(e));
                false
            }
        });

        match result? {
            Ok(outcome) => {
                tracing::debug!(action = %name, ?outcome, "[WidgetStore] Applied");
                Some(outcome)
            }
            Err(e) => {
                report_rejected(&name, &e);
                None
            }
        }
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.sender.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> WidgetState {
        self.sender.borrow().clone()
    }

    /// Reads the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&WidgetState) -> R) -> R {
        f(&self.sender.borrow())
    }

    // ============================================================================
    // Surface
    // ============================================================================

    pub fn toggle_button(&self) {
        self.dispatch(WidgetAction::ToggleButton);
    }

    pub fn open_menu(&self) {
        self.dispatch(WidgetAction::OpenMenu);
    }

    pub fn close_menu(&self) {
        self.dispatch(WidgetAction::CloseMenu);
    }

    pub fn toggle_menu(&self) {
        self.dispatch(WidgetAction::ToggleMenu);
    }

    pub fn open_panel(&self, view: View) {
        self.dispatch(WidgetAction::OpenPanel(view));
    }

    pub fn close_panel(&self) {
        self.dispatch(WidgetAction::ClosePanel);
    }

    pub fn init_widget(&self, config: WidgetConfig) {
        self.dispatch(WidgetAction::InitWidget(config));
    }

    // ============================================================================
    // Course selection
    // ============================================================================

    pub fn set_selected_course(&self, course: Option<SelectedCourse>) {
        self.dispatch(WidgetAction::SetSelectedCourse(course));
    }

    pub fn add_course(&self, course: impl Into<SelectedCourse>) {
        self.dispatch(WidgetAction::AddCourse(course.into()));
    }

    pub fn remove_course(&self, course_id: &str) {
        self.dispatch(WidgetAction::RemoveCourse(course_id.to_string()));
    }

    pub fn clear_courses(&self) {
        self.dispatch(WidgetAction::ClearCourses);
    }

    pub fn set_selected_courses(&self, courses: Vec<SelectedCourse>) {
        self.dispatch(WidgetAction::SetSelectedCourses(courses));
    }

    pub fn is_course_selected(&self, course_id: &str) -> bool {
        self.read(|state| state.is_course_selected(course_id))
    }

    pub fn selected_course_ids(&self) -> Vec<String> {
        self.read(|state| state.selected_courses.iter().map(|c| c.id.clone()).collect())
    }

    pub fn can_proceed(&self) -> bool {
        self.read(WidgetState::can_proceed)
    }

    // ============================================================================
    // Chats
    // ============================================================================

    /// Starts a chat about the current selection and returns its id.
    pub fn create_new_chat(&self, title: Option<&str>) -> Option<String> {
        match self.dispatch(WidgetAction::CreateChat {
            title: title.map(str::to_string),
        })? {
            ActionOutcome::ChatCreated(chat_id) => {
                tracing::info!(chat_id = %chat_id, "[WidgetStore] Created chat");
                Some(chat_id)
            }
            _ => None,
        }
    }

    pub fn open_chat(&self, chat_id: &str, switch_to_courses: bool) {
        self.dispatch(WidgetAction::OpenChat {
            chat_id: chat_id.to_string(),
            switch_to_courses,
        });
    }

    /// Appends a message and returns its id.
    ///
    /// Without a current chat the message only lands in the visible buffer.
    pub fn add_message(&self, draft: MessageDraft) -> Option<String> {
        match self.dispatch(WidgetAction::AddMessage(draft))? {
            ActionOutcome::MessageAdded {
                message_id,
                persisted,
            } => {
                if !persisted {
                    tracing::debug!(
                        message_id = %message_id,
                        "[WidgetStore] No current chat; message kept in buffer only"
                    );
                }
                Some(message_id)
            }
            _ => None,
        }
    }

    /// Appends a message if `chat_id` is still the current chat.
    ///
    /// The check and the append happen in one step, so a chat switch can
    /// never interleave. Returns `None` when the message was dropped.
    pub fn add_message_to(&self, chat_id: Option<&str>, draft: MessageDraft) -> Option<String> {
        let action = WidgetAction::AddMessageTo {
            chat_id: chat_id.map(str::to_string),
            draft,
        };
        match self.dispatch(action)? {
            ActionOutcome::MessageAdded { message_id, .. } => Some(message_id),
            _ => None,
        }
    }

    pub fn update_chat_title(&self, chat_id: &str, title: &str) {
        self.dispatch(WidgetAction::UpdateChatTitle {
            chat_id: chat_id.to_string(),
            title: title.to_string(),
        });
    }

    pub fn delete_chat(&self, chat_id: &str) {
        self.dispatch(WidgetAction::DeleteChat(chat_id.to_string()));
    }

    pub fn restore_chats(&self, chats: Vec<Chat>) {
        self.dispatch(WidgetAction::RestoreChats(chats));
    }

    /// Chats whose course context matches `course_ids`, in history order.
    pub fn get_chats_for_courses(&self, course_ids: &[&str], match_type: MatchType) -> Vec<Chat> {
        self.read(|state| {
            chats_for_courses(&state.chats, course_ids, match_type)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn reset_widget(&self) {
        self.dispatch(WidgetAction::Reset);
    }
}

fn report_rejected(action: &str, error: &CompanionError) {
    if error.is_not_found() {
        tracing::error!(action = %action, "[WidgetStore] {}", error);
    } else {
        tracing::warn!(action = %action, "[WidgetStore] Rejected: {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::state::Surface;

    #[test]
    fn test_unchanged_actions_do_not_notify() {
        let store = WidgetStore::new();
        let mut receiver = store.subscribe();
        receiver.mark_unchanged();

        store.remove_course("py101");
        store.close_panel();
        assert!(!receiver.has_changed().unwrap());

        store.add_course(SelectedCourse::new("py101", "Python"));
        assert!(receiver.has_changed().unwrap());
        receiver.mark_unchanged();

        store.add_course(SelectedCourse::new("py101", "Python"));
        assert!(!receiver.has_changed().unwrap());
    }

    #[test]
    fn test_rejected_action_keeps_state() {
        let store = WidgetStore::new();
        let chat_id = store.create_new_chat(None).unwrap();
        store.add_message(MessageDraft::user("hello"));
        let before = store.snapshot();

        let mut receiver = store.subscribe();
        receiver.mark_unchanged();
        store.open_chat("does-not-exist", true);

        assert!(!receiver.has_changed().unwrap());
        let after = store.snapshot();
        assert_eq!(after.current_chat_id.as_deref(), Some(chat_id.as_str()));
        assert_eq!(after.messages, before.messages);
    }

    #[test]
    fn test_menu_round_trip() {
        let store = WidgetStore::new();
        store.toggle_menu();
        store.open_panel(View::Discovery);
        store.toggle_menu();
        assert_eq!(store.snapshot().surface, Surface::Closed);
        store.toggle_menu();
        store.toggle_menu();
        assert_eq!(store.snapshot().surface, Surface::Closed);
    }
}

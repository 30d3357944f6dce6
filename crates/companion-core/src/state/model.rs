//! Widget state model.

use super::surface::Surface;
use crate::catalog::SelectedCourse;
use crate::chat::{Chat, Message, MonotonicIds};
use crate::config::WidgetConfig;
use serde::{Deserialize, Serialize};

/// Complete UI state of one mounted widget.
///
/// The state is plain data; every mutation goes through
/// [`WidgetState::apply`](super::WidgetState::apply) so that each action is a
/// single atomic step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetState {
    /// Whether the floating button is rendered at all
    pub button_visible: bool,
    /// Menu / panel surface
    pub surface: Surface,
    pub config: WidgetConfig,
    pub user_id: Option<String>,
    /// Course highlighted in a detail view
    pub selected_course: Option<SelectedCourse>,
    /// Courses the next chat will be about (unique ids)
    pub selected_courses: Vec<SelectedCourse>,
    pub current_chat_id: Option<String>,
    /// Chat history, most recent first
    pub chats: Vec<Chat>,
    /// Message buffer of the current chat
    pub messages: Vec<Message>,
    #[serde(skip)]
    pub(crate) ids: MonotonicIds,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            button_visible: true,
            surface: Surface::Closed,
            config: WidgetConfig::default(),
            user_id: None,
            selected_course: None,
            selected_courses: Vec::new(),
            current_chat_id: None,
            chats: Vec::new(),
            messages: Vec::new(),
            ids: MonotonicIds::new(),
        }
    }
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_menu_open(&self) -> bool {
        self.surface.is_menu_open()
    }

    pub fn is_panel_open(&self) -> bool {
        self.surface.is_panel_open()
    }

    pub fn selected_course_ids(&self) -> Vec<&str> {
        self.selected_courses.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn is_course_selected(&self, course_id: &str) -> bool {
        self.selected_courses.iter().any(|c| c.id == course_id)
    }

    /// A chat can only start once at least one course is selected.
    pub fn can_proceed(&self) -> bool {
        !self.selected_courses.is_empty()
    }

    pub fn find_chat(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.chat_id == chat_id)
    }

    pub fn current_chat(&self) -> Option<&Chat> {
        self.current_chat_id
            .as_deref()
            .and_then(|id| self.find_chat(id))
    }
}

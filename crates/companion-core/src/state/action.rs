//! Widget actions and the reducer that applies them.

use super::model::WidgetState;
use super::surface::{Surface, View};
use crate::catalog::SelectedCourse;
use crate::chat::{Chat, MessageDraft};
use crate::config::WidgetConfig;
use crate::error::{CompanionError, Result};
use chrono::{DateTime, Utc};
use strum::AsRefStr;

/// A named mutation of [`WidgetState`].
#[derive(Debug, Clone, PartialEq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum WidgetAction {
    /// Stores the resolved configuration and copies the user id.
    InitWidget(WidgetConfig),
    ToggleButton,
    OpenMenu,
    CloseMenu,
    ToggleMenu,
    OpenPanel(View),
    ClosePanel,
    SetSelectedCourse(Option<SelectedCourse>),
    /// Appends a course unless its id is already selected.
    AddCourse(SelectedCourse),
    RemoveCourse(String),
    ClearCourses,
    /// Replaces the selection. Later duplicates of an id are dropped.
    SetSelectedCourses(Vec<SelectedCourse>),
    /// Snapshots the selection into a new chat and makes it current.
    CreateChat { title: Option<String> },
    OpenChat {
        chat_id: String,
        switch_to_courses: bool,
    },
    AddMessage(MessageDraft),
    /// Appends a message only if `chat_id` is still the current chat.
    AddMessageTo {
        chat_id: Option<String>,
        draft: MessageDraft,
    },
    UpdateChatTitle { chat_id: String, title: String },
    DeleteChat(String),
    /// Replaces the chat history, e.g. with seeded sample chats.
    RestoreChats(Vec<Chat>),
    /// Clears the surface, selection and current chat. History is kept.
    Reset,
}

/// What an applied action did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing changed; subscribers must not be notified.
    Unchanged,
    Changed,
    ChatCreated(String),
    MessageAdded {
        message_id: String,
        /// False when the message only went to the visible buffer
        persisted: bool,
    },
}

impl ActionOutcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, ActionOutcome::Unchanged)
    }

    fn from_flag(changed: bool) -> Self {
        if changed {
            ActionOutcome::Changed
        } else {
            ActionOutcome::Unchanged
        }
    }
}

impl WidgetState {
    /// Applies one action.
    ///
    /// An action either succeeds completely or leaves the state untouched;
    /// errors are only returned for precondition violations such as an
    /// unknown chat id.
    pub fn apply(&mut self, action: WidgetAction, now: DateTime<Utc>) -> Result<ActionOutcome> {
        match action {
            WidgetAction::InitWidget(config) => {
                let user_id = config.user_id.clone();
                let changed = self.config != config || self.user_id != user_id;
                self.config = config;
                self.user_id = user_id;
                Ok(ActionOutcome::from_flag(changed))
            }
            WidgetAction::ToggleButton => {
                self.button_visible = !self.button_visible;
                Ok(ActionOutcome::Changed)
            }
            WidgetAction::OpenMenu => {
                let next = match self.surface {
                    Surface::Closed => Surface::MenuOpen,
                    other => other,
                };
                Ok(self.set_surface(next))
            }
            WidgetAction::CloseMenu => Ok(self.set_surface(Surface::Closed)),
            WidgetAction::ToggleMenu => Ok(self.set_surface(self.surface.toggled_menu())),
            WidgetAction::OpenPanel(view) => Ok(self.set_surface(Surface::PanelOpen(view))),
            WidgetAction::ClosePanel => Ok(self.set_surface(self.surface.with_panel_closed())),
            WidgetAction::SetSelectedCourse(course) => {
                let changed = self.selected_course != course;
                self.selected_course = course;
                Ok(ActionOutcome::from_flag(changed))
            }
            WidgetAction::AddCourse(course) => {
                if self.is_course_selected(&course.id) {
                    return Ok(ActionOutcome::Unchanged);
                }
                self.selected_courses.push(course);
                Ok(ActionOutcome::Changed)
            }
            WidgetAction::RemoveCourse(course_id) => {
                let before = self.selected_courses.len();
                self.selected_courses.retain(|c| c.id != course_id);
                Ok(ActionOutcome::from_flag(self.selected_courses.len() != before))
            }
            WidgetAction::ClearCourses => {
                let changed = !self.selected_courses.is_empty();
                self.selected_courses.clear();
                Ok(ActionOutcome::from_flag(changed))
            }
            WidgetAction::SetSelectedCourses(courses) => {
                let mut unique: Vec<SelectedCourse> = Vec::with_capacity(courses.len());
                for course in courses {
                    if !unique.iter().any(|c| c.id == course.id) {
                        unique.push(course);
                    }
                }
                let changed = self.selected_courses != unique;
                self.selected_courses = unique;
                Ok(ActionOutcome::from_flag(changed))
            }
            WidgetAction::CreateChat { title } => {
                let chat_id = self.ids.next("chat", now);
                let title = title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| crate::chat::DEFAULT_CHAT_TITLE.to_string());
                let chat = Chat::new(chat_id.clone(), title, self.selected_courses.clone(), now);
                self.chats.insert(0, chat);
                self.current_chat_id = Some(chat_id.clone());
                self.messages.clear();
                Ok(ActionOutcome::ChatCreated(chat_id))
            }
            WidgetAction::OpenChat {
                chat_id,
                switch_to_courses,
            } => {
                let chat = self
                    .find_chat(&chat_id)
                    .ok_or_else(|| CompanionError::not_found("Chat", chat_id.clone()))?;
                let messages = chat.messages.clone();
                let context = chat.course_context().to_vec();

                self.current_chat_id = Some(chat_id);
                self.messages = messages;
                if switch_to_courses {
                    self.selected_courses = context;
                }
                Ok(ActionOutcome::Changed)
            }
            WidgetAction::AddMessage(draft) => Ok(self.push_message(draft, now)),
            WidgetAction::AddMessageTo { chat_id, draft } => {
                if self.current_chat_id != chat_id {
                    return Ok(ActionOutcome::Unchanged);
                }
                Ok(self.push_message(draft, now))
            }
            WidgetAction::UpdateChatTitle { chat_id, title } => {
                let chat = self
                    .chats
                    .iter_mut()
                    .find(|c| c.chat_id == chat_id)
                    .ok_or_else(|| CompanionError::not_found("Chat", chat_id.clone()))?;
                if chat.title == title {
                    return Ok(ActionOutcome::Unchanged);
                }
                chat.title = title;
                Ok(ActionOutcome::Changed)
            }
            WidgetAction::DeleteChat(chat_id) => {
                let before = self.chats.len();
                self.chats.retain(|c| c.chat_id != chat_id);
                if self.chats.len() == before {
                    return Ok(ActionOutcome::Unchanged);
                }
                if self.current_chat_id.as_deref() == Some(chat_id.as_str()) {
                    self.current_chat_id = None;
                    self.messages.clear();
                }
                Ok(ActionOutcome::Changed)
            }
            WidgetAction::RestoreChats(chats) => {
                let changed = self.chats != chats;
                self.chats = chats;
                if let Some(current) = self.current_chat_id.clone() {
                    if self.find_chat(&current).is_none() {
                        self.current_chat_id = None;
                        self.messages.clear();
                    }
                }
                Ok(ActionOutcome::from_flag(changed))
            }
            WidgetAction::Reset => {
                let next = WidgetState {
                    button_visible: self.button_visible,
                    surface: Surface::Closed,
                    config: self.config.clone(),
                    user_id: self.user_id.clone(),
                    selected_course: None,
                    selected_courses: Vec::new(),
                    current_chat_id: None,
                    chats: std::mem::take(&mut self.chats),
                    messages: Vec::new(),
                    ids: self.ids.clone(),
                };
                let changed = self.surface != next.surface
                    || self.selected_course.is_some()
                    || !self.selected_courses.is_empty()
                    || self.current_chat_id.is_some()
                    || !self.messages.is_empty();
                *self = next;
                Ok(ActionOutcome::from_flag(changed))
            }
        }
    }

    fn set_surface(&mut self, next: Surface) -> ActionOutcome {
        if self.surface == next {
            return ActionOutcome::Unchanged;
        }
        self.surface = next;
        ActionOutcome::Changed
    }

    /// Appends to the visible buffer and, when there is one, the current chat.
    fn push_message(&mut self, draft: MessageDraft, now: DateTime<Utc>) -> ActionOutcome {
        let message = draft.into_message(self.ids.next("msg", now), now);
        let message_id = message.id.clone();

        let current = self.current_chat_id.clone();
        let chat = current
            .as_deref()
            .and_then(|id| self.chats.iter_mut().find(|c| c.chat_id == id));
        let persisted = match chat {
            Some(chat) => {
                chat.push_message(message.clone());
                true
            }
            None => false,
        };
        self.messages.push(message);
        ActionOutcome::MessageAdded {
            message_id,
            persisted,
        }
    }
}

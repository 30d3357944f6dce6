//! View models backing each panel of the widget.
//!
//! # Module Structure
//!
//! - `discovery`: landing page, "I know what I want" browser, "help me decide" agent chat
//! - `search`: catalog search
//! - `chat`: course chat with delayed placeholder replies
//! - `history`: chat history filter and course-context disambiguation
//! - `notes`, `quiz`, `mindmap`: chat side panels

mod chat;
mod discovery;
mod history;
mod mindmap;
mod notes;
mod quiz;
mod search;

pub use chat::{BOT_REPLY_DELAY, ChatView, GREETING};
pub use discovery::{AGENT_REPLY_DELAY, DiscoveryMessage, DiscoveryPage, DiscoveryView};
pub use history::{ChatHistoryView, DisambiguationPrompt, HistoryClick, HistoryEntry, HistoryFilter};
pub use mindmap::{MindMapMode, MindMapView};
pub use notes::NotesView;
pub use quiz::{AnswerResult, QuizProgress, QuizSession, QuizView};
pub use search::SearchView;

use std::sync::{Mutex, MutexGuard};

/// Locks a view-local mutex, recovering the data if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

//! Application layer for CourseCompanion.
//!
//! The [`WidgetStore`] owns the widget state; view models read and mutate it
//! through named actions and subscribe to its changes.

pub mod store;
pub mod views;

pub use store::WidgetStore;
pub use views::{
    ChatHistoryView, ChatView, DiscoveryView, MindMapView, NotesView, QuizView, SearchView,
};

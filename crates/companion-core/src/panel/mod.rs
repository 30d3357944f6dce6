//! Side panels of the chat page: notes, quizzes and mind maps.

mod mindmap;
mod note;
mod quiz;

pub use mindmap::{MindMap, MindMapNode, MindMapSummary};
pub use note::{FROM_CHAT_TAG, Note, NoteFilter, NoteSource};
pub use quiz::{Question, QuizSet, QuizStatus, QuizSummary};

//! Chat domain module.
//!
//! # Module Structure
//!
//! - `model`: `Chat` with its immutable course context
//! - `message`: `Message`, `MessageType`, `MessageDraft`
//! - `context`: exact / partial / none matching against a course selection
//! - `ids`: monotonic time-based ids for chats and messages

mod context;
mod ids;
mod message;
mod model;

pub use context::{
    CourseMatch, MatchType, chats_for_courses, classify, has_overlap, is_exact_match,
};
pub use ids::MonotonicIds;
pub use message::{Message, MessageDraft, MessageType};
pub use model::{Chat, DEFAULT_CHAT_TITLE};

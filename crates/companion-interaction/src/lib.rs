//! Responders that produce the companion's side of a conversation.
//!
//! - [`DiscoveryAgent`]: keyword-driven course discovery script
//! - [`PlaceholderResponder`]: fixed reply used by the course chat

pub mod discovery_agent;
pub mod keywords;
pub mod placeholder;

pub use discovery_agent::{
    AgentContext, AgentReply, AgentStage, DiscoveryAgent, Recommendation, ReplyOption,
};
pub use keywords::{Experience, Goal, Interest};
pub use placeholder::PlaceholderResponder;

/// Something that answers user input with a reply.
///
/// Responders are synchronous; any "thinking" delay is added by the caller
/// when it schedules the reply.
pub trait Responder: Send {
    type Reply;

    /// Short name used in log events.
    fn name(&self) -> &str;

    fn respond(&mut self, input: &str) -> Self::Reply;
}

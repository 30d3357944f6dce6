//! Course chat panel.

use super::history::ChatHistoryView;
use super::lock;
use crate::store::WidgetStore;
use companion_core::chat::{Message, MessageDraft};
use companion_execution::ReplyScheduler;
use companion_interaction::PlaceholderResponder;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Delay before the placeholder bot answers.
pub const BOT_REPLY_DELAY: Duration = Duration::from_millis(1000);

pub const GREETING: &str = "Hello! I'm your Course Companion. How can I help you today?";

pub struct ChatView {
    store: Arc<WidgetStore>,
    responder: PlaceholderResponder,
    scheduler: ReplyScheduler,
    /// Chat id of every reply that has not arrived yet, one entry per reply
    awaiting: Arc<Mutex<Vec<Option<String>>>>,
    history: ChatHistoryView,
}

impl ChatView {
    pub fn new(store: Arc<WidgetStore>) -> Self {
        Self {
            history: ChatHistoryView::new(Arc::clone(&store)),
            store,
            responder: PlaceholderResponder::new(),
            scheduler: ReplyScheduler::new(),
            awaiting: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Starts a chat about the selected courses and greets the user.
    pub fn start_new_chat(&self, title: Option<&str>) -> Option<String> {
        let chat_id = self.store.create_new_chat(title)?;
        self.store.add_message(MessageDraft::bot(GREETING));
        Some(chat_id)
    }

    /// Posts a user message and schedules the bot reply.
    ///
    /// The reply is dropped if another chat was opened in the meantime.
    pub fn send_message(&self, content: &str) -> bool {
        let content = content.trim();
        if content.is_empty() {
            return false;
        }

        let chat_id = self.store.read(|state| state.current_chat_id.clone());
        if self.store.add_message(MessageDraft::user(content)).is_none() {
            return false;
        }
        lock(&self.awaiting).push(chat_id.clone());

        let store = Arc::clone(&self.store);
        let awaiting = Arc::clone(&self.awaiting);
        let reply = self.responder.reply_to(content);
        let reply_chat = chat_id.clone();
        let scheduled = self.scheduler.schedule("chat", BOT_REPLY_DELAY, move || {
            if store
                .add_message_to(reply_chat.as_deref(), MessageDraft::bot(reply))
                .is_none()
            {
                tracing::debug!("[ChatView] Chat switched; reply dropped");
            }
            settle(&awaiting, &reply_chat);
        });

        if !scheduled {
            settle(&self.awaiting, &chat_id);
        }
        true
    }

    pub fn messages(&self) -> Vec<Message> {
        self.store.read(|state| state.messages.clone())
    }

    /// True while a reply for the current chat is still on its way.
    pub fn is_typing(&self) -> bool {
        let current = self.store.read(|state| state.current_chat_id.clone());
        lock(&self.awaiting).contains(&current)
    }

    pub fn history(&self) -> &ChatHistoryView {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut ChatHistoryView {
        &mut self.history
    }

    /// Cancels pending replies.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
        lock(&self.awaiting).clear();
    }

    pub fn scheduler(&self) -> &ReplyScheduler {
        &self.scheduler
    }
}

fn settle(awaiting: &Mutex<Vec<Option<String>>>, chat_id: &Option<String>) {
    let mut awaiting = lock(awaiting);
    if let Some(pos) = awaiting.iter().position(|id| id == chat_id) {
        awaiting.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::catalog::SelectedCourse;
    use companion_core::chat::MessageType;

    fn chat_view() -> ChatView {
        let store = Arc::new(WidgetStore::new());
        store.add_course(SelectedCourse::new("py101", "Python Fundamentals"));
        ChatView::new(store)
    }

    #[test]
    fn test_new_chat_starts_with_greeting() {
        let view = chat_view();
        let chat_id = view.start_new_chat(None).unwrap();

        let messages = view.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message_type, MessageType::Bot);
        assert_eq!(messages[0].content, GREETING);

        let state = view.store.snapshot();
        assert_eq!(state.chats[0].chat_id, chat_id);
        assert_eq!(state.chats[0].message_count, 1);
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let view = chat_view();
        view.start_new_chat(None);
        assert!(!view.send_message("   "));
        assert_eq!(view.messages().len(), 1);
    }

    #[test]
    fn test_send_without_runtime_posts_user_message_only() {
        let view = chat_view();
        view.start_new_chat(None);
        assert!(view.send_message("  What is a list?  "));

        let messages = view.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "What is a list?");
        assert!(!view.is_typing());
    }
}

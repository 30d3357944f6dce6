//! Course discovery panel.

use super::lock;
use crate::store::WidgetStore;
use companion_core::catalog::{Course, CourseCategory, CourseQuery, CourseRepository};
use companion_execution::ReplyScheduler;
use companion_interaction::{AgentReply, AgentStage, DiscoveryAgent, ReplyOption};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strum::{AsRefStr, Display};

/// Delay before the discovery agent answers.
pub const AGENT_REPLY_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DiscoveryPage {
    #[default]
    Landing,
    /// Browse purchased courses and pick some
    KnowWhatIWant,
    /// Talk to the discovery agent
    HelpMeDecide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryMessage {
    User(String),
    Agent(AgentReply),
}

struct Conversation {
    agent: DiscoveryAgent,
    messages: Vec<DiscoveryMessage>,
    typing: bool,
    /// Bumped on restart so replies scheduled for an older conversation are dropped
    generation: u64,
}

impl Conversation {
    fn restart(&mut self) {
        self.agent.reset();
        self.messages = vec![DiscoveryMessage::Agent(self.agent.initial_message())];
        self.typing = false;
        self.generation += 1;
    }
}

pub struct DiscoveryView {
    store: Arc<WidgetStore>,
    catalog: Arc<dyn CourseRepository>,
    page: DiscoveryPage,
    query: CourseQuery,
    conversation: Arc<Mutex<Conversation>>,
    scheduler: ReplyScheduler,
}

impl DiscoveryView {
    pub fn new(store: Arc<WidgetStore>, catalog: Arc<dyn CourseRepository>) -> Self {
        let agent = DiscoveryAgent::new(Arc::clone(&catalog));
        let messages = vec![DiscoveryMessage::Agent(agent.initial_message())];
        Self {
            store,
            catalog,
            page: DiscoveryPage::Landing,
            query: CourseQuery::default(),
            conversation: Arc::new(Mutex::new(Conversation {
                agent,
                messages,
                typing: false,
                generation: 0,
            })),
            scheduler: ReplyScheduler::new(),
        }
    }

    pub fn page(&self) -> DiscoveryPage {
        self.page
    }

    pub fn open_know_what_i_want(&mut self) {
        self.query = CourseQuery::default();
        self.page = DiscoveryPage::KnowWhatIWant;
    }

    /// Opens the agent chat with a fresh conversation.
    pub fn open_help_me_decide(&mut self) {
        lock(&self.conversation).restart();
        self.page = DiscoveryPage::HelpMeDecide;
    }

    pub fn back(&mut self) {
        self.page = DiscoveryPage::Landing;
    }

    // ============================================================================
    // I know what I want
    // ============================================================================

    pub fn set_query(&mut self, text: &str) {
        self.query.text = text.to_string();
    }

    pub fn set_category(&mut self, category_id: &str) {
        self.query.category = category_id.to_string();
    }

    pub fn query(&self) -> &CourseQuery {
        &self.query
    }

    pub fn categories(&self) -> Vec<CourseCategory> {
        self.catalog.categories()
    }

    /// Purchased courses matching the current query and category.
    pub fn available_courses(&self) -> Vec<Course> {
        self.query.apply(&self.catalog.get_purchased())
    }

    pub fn is_selected(&self, course_id: &str) -> bool {
        self.store.is_course_selected(course_id)
    }

    /// Adds or removes a course from the selection.
    ///
    /// Only purchased courses can be selected; returns false otherwise.
    pub fn toggle_course(&self, course: &Course) -> bool {
        if !course.is_purchased {
            tracing::warn!(course_id = %course.id, "[Discovery] Course not purchased; selection ignored");
            return false;
        }
        if self.store.is_course_selected(&course.id) {
            self.store.remove_course(&course.id);
        } else {
            self.store.add_course(course);
        }
        true
    }

    pub fn can_proceed(&self) -> bool {
        self.store.can_proceed()
    }

    // ============================================================================
    // Help me decide
    // ============================================================================

    pub fn messages(&self) -> Vec<DiscoveryMessage> {
        lock(&self.conversation).messages.clone()
    }

    pub fn is_typing(&self) -> bool {
        lock(&self.conversation).typing
    }

    pub fn stage(&self) -> AgentStage {
        lock(&self.conversation).agent.stage()
    }

    /// Sends user text to the agent; the reply arrives after [`AGENT_REPLY_DELAY`].
    ///
    /// Blank input, or input while the agent is still typing, is ignored
    /// and returns false.
    pub fn send_message(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let generation = {
            let mut conversation = lock(&self.conversation);
            if conversation.typing {
                tracing::debug!("[Discovery] Agent is still typing; input ignored");
                return false;
            }
            conversation
                .messages
                .push(DiscoveryMessage::User(text.to_string()));
            conversation.typing = true;
            conversation.generation
        };

        let conversation = Arc::clone(&self.conversation);
        let input = text.to_string();
        let scheduled = self
            .scheduler
            .schedule("discovery", AGENT_REPLY_DELAY, move || {
                let mut conversation = lock(&conversation);
                if conversation.generation != generation {
                    tracing::debug!("[Discovery] Conversation restarted; reply dropped");
                    return;
                }
                let reply = conversation.agent.process_message(&input);
                conversation.messages.push(DiscoveryMessage::Agent(reply));
                conversation.typing = false;
            });

        if !scheduled {
            lock(&self.conversation).typing = false;
        }
        true
    }

    /// Quick-reply buttons send their label as if it was typed.
    pub fn choose_option(&self, option: &ReplyOption) -> bool {
        let text = if option.label.is_empty() {
            &option.value
        } else {
            &option.label
        };
        self.send_message(text)
    }

    /// Toggles a recommended course; unpurchased courses cannot be picked.
    pub fn toggle_recommended(&self, course: &Course) -> bool {
        self.toggle_course(course)
    }

    /// Starts the purchase flow for a course.
    pub fn purchase(&self, course: &Course) {
        tracing::info!(course_id = %course.id, "[Discovery] Purchase course requested");
    }

    /// Cancels agent replies that have not arrived yet.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_infrastructure::StaticCourseRepository;

    fn view() -> DiscoveryView {
        DiscoveryView::new(
            Arc::new(WidgetStore::new()),
            Arc::new(StaticCourseRepository::new()),
        )
    }

    #[test]
    fn test_page_navigation() {
        let mut view = view();
        assert_eq!(view.page(), DiscoveryPage::Landing);
        view.open_know_what_i_want();
        assert_eq!(view.page(), DiscoveryPage::KnowWhatIWant);
        view.back();
        view.open_help_me_decide();
        assert_eq!(view.page().to_string(), "help-me-decide");
    }

    #[test]
    fn test_browse_lists_purchased_only() {
        let mut view = view();
        view.open_know_what_i_want();
        let all = view.available_courses();
        assert_eq!(all.len(), 6);
        assert!(all.iter().all(|c| c.is_purchased));

        view.set_query("aws");
        let ids: Vec<_> = view.available_courses().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["cloud-aws-basics-701"]);

        view.set_query("");
        view.set_category("design");
        assert_eq!(view.available_courses().len(), 1);
    }

    #[test]
    fn test_toggle_course_selection() {
        let view = view();
        let catalog = StaticCourseRepository::new();
        let owned = catalog.find_by_id("cpp-fundamentals-101").unwrap();
        let not_owned = catalog.find_by_id("ml-fundamentals-401").unwrap();

        assert!(!view.can_proceed());
        assert!(view.toggle_course(&owned));
        assert!(view.is_selected("cpp-fundamentals-101"));
        assert!(view.can_proceed());
        assert!(view.toggle_course(&owned));
        assert!(!view.is_selected("cpp-fundamentals-101"));

        assert!(!view.toggle_recommended(&not_owned));
        assert!(!view.is_selected("ml-fundamentals-401"));
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let view = view();
        assert!(!view.send_message("   "));
        assert_eq!(view.messages().len(), 1);
        assert!(!view.is_typing());
    }
}

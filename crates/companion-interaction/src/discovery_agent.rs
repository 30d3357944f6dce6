//! Scripted course discovery agent.
//!
//! The agent walks a fixed, forward-only script:
//!
//! ```text
//! Initial --interest--> Experience --any--> Goal --any--> Completed
//! ```
//!
//! Greetings are answered in every stage without moving the script.

use crate::Responder;
use crate::keywords::{
    EXPERIENCE_KEYWORDS, Experience, GOAL_KEYWORDS, GREETINGS, Goal, INTEREST_KEYWORDS, Interest,
    contains_any, first_match, recommended_course_ids,
};
use companion_core::catalog::{Course, CourseRepository};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};

pub const INITIAL_MESSAGE: &str =
    "Hi! I'm here to help you find the perfect course. What would you like to learn today?";
pub const GREETING_REPLY: &str = "Hello! Great to meet you! Tell me, what area are you interested in exploring? Programming, Data Science, Web Development, or something else?";
pub const REPROMPT_REPLY: &str = "That sounds interesting! Could you tell me more? Are you interested in programming, data science, web development, or something else?";
pub const GOAL_PROMPT: &str = "Perfect! What's your main goal?";
pub const RECOMMENDATION_INTRO: &str = "Based on your interests and goals, I recommend these courses:";

const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentStage {
    Initial,
    Experience,
    Goal,
    Completed,
}

/// Answers collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentContext {
    pub interest: Option<Interest>,
    pub experience: Option<Experience>,
    pub goal: Option<Goal>,
}

/// A quick-reply button; clicking it sends `label` as user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyOption {
    pub label: String,
    pub value: String,
}

impl ReplyOption {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub course: Course,
    pub match_percent: u8,
}

impl Recommendation {
    pub fn match_label(&self) -> String {
        format!("{}% match", self.match_percent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AgentReply {
    Text {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<ReplyOption>,
    },
    Courses {
        content: String,
        courses: Vec<Recommendation>,
    },
}

impl AgentReply {
    fn text(content: impl Into<String>) -> Self {
        AgentReply::Text {
            content: content.into(),
            options: Vec::new(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            AgentReply::Text { content, .. } | AgentReply::Courses { content, .. } => content,
        }
    }

    pub fn options(&self) -> &[ReplyOption] {
        match self {
            AgentReply::Text { options, .. } => options,
            AgentReply::Courses { .. } => &[],
        }
    }

    pub fn courses(&self) -> &[Recommendation] {
        match self {
            AgentReply::Courses { courses, .. } => courses,
            AgentReply::Text { .. } => &[],
        }
    }
}

/// Keyword-driven discovery script backed by the course catalog.
pub struct DiscoveryAgent {
    catalog: Arc<dyn CourseRepository>,
    stage: AgentStage,
    context: AgentContext,
}

impl DiscoveryAgent {
    pub fn new(catalog: Arc<dyn CourseRepository>) -> Self {
        Self {
            catalog,
            stage: AgentStage::Initial,
            context: AgentContext::default(),
        }
    }

    pub fn stage(&self) -> AgentStage {
        self.stage
    }

    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    pub fn initial_message(&self) -> AgentReply {
        AgentReply::text(INITIAL_MESSAGE)
    }

    /// Restarts the script with an empty context.
    pub fn reset(&mut self) {
        self.stage = AgentStage::Initial;
        self.context = AgentContext::default();
    }

    pub fn process_message(&mut self, input: &str) -> AgentReply {
        let input = input.to_lowercase();

        if contains_any(&input, GREETINGS) {
            return AgentReply::text(GREETING_REPLY);
        }

        match self.stage {
            AgentStage::Initial => self.handle_initial(&input),
            AgentStage::Experience => self.handle_experience(&input),
            AgentStage::Goal => self.handle_goal(&input),
            AgentStage::Completed => self.recommendations_reply(),
        }
    }

    fn handle_initial(&mut self, input: &str) -> AgentReply {
        let Some(interest) = first_match(INTEREST_KEYWORDS, input) else {
            return AgentReply::text(REPROMPT_REPLY);
        };

        self.context.interest = Some(interest);
        self.advance(AgentStage::Experience);
        AgentReply::Text {
            content: format!(
                "Great choice! {} is a fantastic field. What's your experience level?",
                interest.display_name()
            ),
            options: vec![
                ReplyOption::new("Complete Beginner", "beginner"),
                ReplyOption::new("Some Experience", "intermediate"),
                ReplyOption::new("Advanced", "advanced"),
            ],
        }
    }

    fn handle_experience(&mut self, input: &str) -> AgentReply {
        if let Some(experience) = first_match(EXPERIENCE_KEYWORDS, input) {
            self.context.experience = Some(experience);
        }
        self.advance(AgentStage::Goal);
        AgentReply::Text {
            content: GOAL_PROMPT.to_string(),
            options: vec![
                ReplyOption::new("Career Change", "career"),
                ReplyOption::new("Skill Enhancement", "skill"),
                ReplyOption::new("Personal Project", "project"),
                ReplyOption::new("Interview Prep", "interview"),
            ],
        }
    }

    fn handle_goal(&mut self, input: &str) -> AgentReply {
        if let Some(goal) = first_match(GOAL_KEYWORDS, input) {
            self.context.goal = Some(goal);
        }
        self.advance(AgentStage::Completed);
        self.recommendations_reply()
    }

    fn recommendations_reply(&self) -> AgentReply {
        AgentReply::Courses {
            content: RECOMMENDATION_INTRO.to_string(),
            courses: self.recommendations(),
        }
    }

    /// Ranked courses for the collected context, at most three.
    ///
    /// Match percentages follow the table rank (95, 90, 85, ...); ids that
    /// are not in the catalog are skipped.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommended_course_ids(self.context.interest, self.context.experience)
            .iter()
            .enumerate()
            .filter_map(|(rank, id)| {
                self.catalog.find_by_id(id).map(|course| Recommendation {
                    course,
                    match_percent: 95u8.saturating_sub(5 * rank as u8),
                })
            })
            .take(MAX_RECOMMENDATIONS)
            .collect()
    }

    fn advance(&mut self, next: AgentStage) {
        tracing::debug!("[DiscoveryAgent] {} -> {}", self.stage, next);
        self.stage = next;
    }
}

impl Responder for DiscoveryAgent {
    type Reply = AgentReply;

    fn name(&self) -> &str {
        "discovery"
    }

    fn respond(&mut self, input: &str) -> AgentReply {
        self.process_message(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::catalog::CourseCategory;

    struct EmptyCatalog;

    impl CourseRepository for EmptyCatalog {
        fn get_all(&self) -> Vec<Course> {
            Vec::new()
        }

        fn categories(&self) -> Vec<CourseCategory> {
            Vec::new()
        }
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let mut agent = DiscoveryAgent::new(Arc::new(EmptyCatalog));
        agent.process_message("python");
        agent.process_message("beginner");
        let reply = agent.process_message("career");
        assert_eq!(agent.stage(), AgentStage::Completed);
        assert!(reply.courses().is_empty());
        assert_eq!(reply.content(), RECOMMENDATION_INTRO);
    }

    #[test]
    fn test_reply_serializes_with_type_tag() {
        let json = serde_json::to_value(AgentReply::text("x")).unwrap();
        assert_eq!(json["type"], "text");
        assert!(json.get("options").is_none());
    }
}

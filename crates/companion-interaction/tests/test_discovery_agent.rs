use companion_infrastructure::StaticCourseRepository;
use companion_interaction::discovery_agent::{GREETING_REPLY, INITIAL_MESSAGE, REPROMPT_REPLY};
use companion_interaction::{
    AgentStage, DiscoveryAgent, Experience, Goal, Interest, PlaceholderResponder, Responder,
};
use std::sync::Arc;

fn agent() -> DiscoveryAgent {
    DiscoveryAgent::new(Arc::new(StaticCourseRepository::new()))
}

#[test]
fn test_greeting_in_every_stage_keeps_stage() {
    let mut agent = agent();
    assert_eq!(agent.process_message("hi").content(), GREETING_REPLY);
    assert_eq!(agent.stage(), AgentStage::Initial);

    agent.process_message("python");
    assert_eq!(agent.process_message("Hello there").content(), GREETING_REPLY);
    assert_eq!(agent.stage(), AgentStage::Experience);

    agent.process_message("beginner");
    assert_eq!(agent.process_message("HEY").content(), GREETING_REPLY);
    assert_eq!(agent.stage(), AgentStage::Goal);

    let recommendations = agent.process_message("career");
    assert!(!recommendations.courses().is_empty());
    assert_eq!(agent.stage(), AgentStage::Completed);
    assert_eq!(agent.process_message("hello again").content(), GREETING_REPLY);
    assert_eq!(agent.stage(), AgentStage::Completed);
    assert_eq!(agent.process_message("ok"), recommendations);
}

#[test]
fn test_python_selects_programming() {
    let mut agent = agent();
    let reply = agent.process_message("python");

    assert_eq!(agent.stage(), AgentStage::Experience);
    assert_eq!(agent.context().interest, Some(Interest::Programming));
    assert_eq!(
        reply.content(),
        "Great choice! Programming is a fantastic field. What's your experience level?"
    );
    let values: Vec<_> = reply.options().iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["beginner", "intermediate", "advanced"]);
}

#[test]
fn test_unmatched_initial_input_reprompts() {
    let mut agent = agent();
    let reply = agent.process_message("cooking");
    assert_eq!(reply.content(), REPROMPT_REPLY);
    assert_eq!(agent.stage(), AgentStage::Initial);
    assert_eq!(agent.context().interest, None);
}

#[test]
fn test_unmatched_answers_still_advance() {
    let mut agent = agent();
    agent.process_message("pandas");
    agent.process_message("no idea");
    assert_eq!(agent.stage(), AgentStage::Goal);
    assert_eq!(agent.context().experience, None);

    let reply = agent.process_message("whatever");
    assert_eq!(agent.stage(), AgentStage::Completed);
    assert_eq!(agent.context().goal, None);

    // data science without experience falls back to the beginner tier
    let ids: Vec<_> = reply.courses().iter().map(|r| r.course.id.as_str()).collect();
    assert_eq!(ids, vec!["python-data-science-201"]);
}

#[test]
fn test_full_script_recommendations() {
    let mut agent = agent();
    agent.process_message("I want to learn coding");
    agent.process_message("Some Experience");
    let reply = agent.process_message("Interview Prep");

    assert_eq!(agent.context().experience, Some(Experience::Intermediate));
    assert_eq!(agent.context().goal, Some(Goal::Interview));

    let courses = reply.courses();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].course.id, "dsa-interview-prep-501");
    assert_eq!(courses[0].match_label(), "95% match");
    assert_eq!(courses[1].course.id, "web-dev-fullstack-301");
    assert_eq!(courses[1].match_percent, 90);
}

#[test]
fn test_completed_is_terminal_and_reset_restarts() {
    let mut agent = agent();
    agent.process_message("figma");
    agent.process_message("advanced");
    let first = agent.process_message("project");

    let again = agent.process_message("actually security");
    assert_eq!(agent.stage(), AgentStage::Completed);
    assert_eq!(again, first);

    agent.reset();
    assert_eq!(agent.stage(), AgentStage::Initial);
    assert_eq!(agent.context().interest, None);
    assert_eq!(agent.initial_message().content(), INITIAL_MESSAGE);
}

#[test]
fn test_responders_share_trait() {
    let mut agent = agent();
    assert_eq!(agent.name(), "discovery");
    assert_eq!(agent.respond("hello").content(), GREETING_REPLY);

    let mut placeholder = PlaceholderResponder::new();
    assert_eq!(placeholder.name(), "placeholder");
    assert!(placeholder.respond("x").contains("\"x\""));
}

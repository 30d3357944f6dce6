//! Sample data shown in the side panels and the chat history.

use chrono::{DateTime, Utc};
use companion_core::catalog::SelectedCourse;
use companion_core::chat::Chat;
use companion_core::panel::{
    MindMap, MindMapNode, MindMapSummary, Note, NoteSource, Question, QuizSet, QuizStatus,
    QuizSummary,
};

fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

pub fn sample_notes() -> Vec<Note> {
    vec![
        Note::new(
            "Key Concepts from Chat",
            "Remember to review the three main principles discussed...",
            NoteSource::Chat,
            at("2024-01-18T10:30:00Z"),
        )
        .with_tags(["important", "review"]),
        Note::new(
            "Study Plan",
            "Week 1: Focus on fundamentals\nWeek 2: Practice problems\nWeek 3: Review",
            NoteSource::Manual,
            at("2024-01-17T14:20:00Z"),
        )
        .with_tags(["planning"]),
    ]
}

pub fn quiz_summaries() -> Vec<QuizSummary> {
    let row = |id, title: &str, question_count, completed, score, status| QuizSummary {
        id,
        title: title.to_string(),
        question_count,
        completed,
        score,
        status,
    };
    vec![
        row(1, "Chapter 1: Fundamentals", 10, 8, 80, QuizStatus::InProgress),
        row(2, "Midterm Review", 20, 20, 85, QuizStatus::Completed),
        row(3, "Practice Quiz 3", 15, 0, 0, QuizStatus::NotStarted),
    ]
}

/// Question set loaded when any quiz is started.
pub fn sample_quiz() -> QuizSet {
    let options = |items: [&str; 4]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
    QuizSet {
        id: 1,
        title: "Chapter 1: Fundamentals".to_string(),
        questions: vec![
            Question {
                id: 1,
                question: "What is the primary purpose of active learning techniques?".to_string(),
                options: options([
                    "To memorize information faster",
                    "To engage with material and enhance retention",
                    "To complete assignments quickly",
                    "To avoid studying altogether",
                ]),
                correct_answer: 1,
                explanation: "Active learning techniques help engage with the material more deeply, which enhances long-term retention and understanding.".to_string(),
            },
            Question {
                id: 2,
                question: "Which of the following is an example of spaced repetition?".to_string(),
                options: options([
                    "Studying all night before an exam",
                    "Reviewing material at increasing intervals",
                    "Reading the textbook once",
                    "Highlighting important passages",
                ]),
                correct_answer: 1,
                explanation: "Spaced repetition involves reviewing material at gradually increasing intervals, which is proven to improve long-term retention.".to_string(),
            },
        ],
    }
}

pub fn mind_map_summaries() -> Vec<MindMapSummary> {
    let row = |id, title: &str, node_count, day: &str, thumbnail: &str| MindMapSummary {
        id,
        title: title.to_string(),
        node_count,
        last_modified: at(day),
        thumbnail: thumbnail.to_string(),
    };
    vec![
        row(1, "Course Overview", 12, "2024-01-18T00:00:00Z", "🌳"),
        row(2, "Chapter 1 Concepts", 8, "2024-01-17T00:00:00Z", "🧩"),
        row(3, "Study Techniques", 15, "2024-01-16T00:00:00Z", "📚"),
    ]
}

/// Node tree shown when any map is opened.
pub fn sample_mind_map() -> MindMap {
    let root = |id: &str, label: &str, x, y, color: &str, children: [&str; 2]| MindMapNode {
        color: Some(color.to_string()),
        children: children.iter().map(|c| c.to_string()).collect(),
        ..MindMapNode::new(id, label, x, y)
    };
    let child = |id: &str, label: &str, x, y, parent: &str| MindMapNode {
        parent: Some(parent.to_string()),
        ..MindMapNode::new(id, label, x, y)
    };

    MindMap {
        id: 1,
        title: "Study Techniques".to_string(),
        center_node: MindMapNode::new("center", "Effective Learning", 50.0, 50.0),
        nodes: vec![
            root("active", "Active Recall", 30.0, 30.0, "#8629FF", ["flashcards", "self-testing"]),
            root("spaced", "Spaced Repetition", 70.0, 30.0, "#FF1F38", ["schedule", "intervals"]),
            root("interleaving", "Interleaving", 30.0, 70.0, "#10B981", ["mix-topics", "practice"]),
            root("elaboration", "Elaboration", 70.0, 70.0, "#F59E0B", ["explain", "connect"]),
            child("flashcards", "Flashcards", 20.0, 20.0, "active"),
            child("self-testing", "Self-Testing", 25.0, 35.0, "active"),
            child("schedule", "Schedule", 75.0, 20.0, "spaced"),
            child("intervals", "Intervals", 80.0, 35.0, "spaced"),
        ],
    }
}

/// Chat history seeded into a fresh widget, most recent first.
pub fn sample_chats() -> Vec<Chat> {
    let python = SelectedCourse::new("py101", "Python Fundamentals");
    let cpp = SelectedCourse::new("cpp201", "C++ Advanced");
    let devops = SelectedCourse::new("devops301", "DevOps Fundamentals");
    let ml = SelectedCourse::new("ml401", "Machine Learning");

    let chat = |id: &str,
                title: &str,
                context: Vec<SelectedCourse>,
                last_message: &str,
                count: usize,
                created: &str,
                active: &str| {
        let mut chat = Chat::new(id, title, context, at(created));
        chat.last_message = Some(last_message.to_string());
        chat.message_count = count;
        chat.last_activity = at(active);
        chat
    };

    vec![
        chat(
            "chat_001",
            "Python Basics and C++ Pointers",
            vec![python.clone(), cpp.clone()],
            "Can you explain the difference between pointers in C++ and references in Python?",
            24,
            "2024-01-18T09:15:00Z",
            "2024-01-18T10:30:00Z",
        ),
        chat(
            "chat_002",
            "DevOps CI/CD Pipeline Setup",
            vec![devops.clone(), python.clone()],
            "How do I configure GitHub Actions for automated testing?",
            15,
            "2024-01-17T14:20:00Z",
            "2024-01-17T15:45:00Z",
        ),
        chat(
            "chat_003",
            "Data Structures Quiz Prep",
            vec![python, cpp],
            "What are the time complexities for common operations on hash tables?",
            31,
            "2024-01-16T09:00:00Z",
            "2024-01-16T11:20:00Z",
        ),
        chat(
            "chat_004",
            "ML Model Deployment",
            vec![ml, devops],
            "Best practices for deploying ML models in production?",
            18,
            "2024-01-15T13:00:00Z",
            "2024-01-15T14:30:00Z",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::chat::{MatchType, chats_for_courses};

    #[test]
    fn test_sample_chats_match_python() {
        let chats = sample_chats();
        let related = chats_for_courses(&chats, &["py101"], MatchType::Any);
        assert_eq!(related.len(), 3);
        let exact = chats_for_courses(&chats, &["cpp201", "py101"], MatchType::Exact);
        let ids: Vec<_> = exact.iter().map(|c| c.chat_id.as_str()).collect();
        assert_eq!(ids, vec!["chat_001", "chat_003"]);
    }

    #[test]
    fn test_sample_dates_parse() {
        let chats = sample_chats();
        assert_eq!(chats[0].created_at.to_rfc3339(), "2024-01-18T09:15:00+00:00");
        assert!(mind_map_summaries()
            .iter()
            .all(|m| m.last_modified.timestamp() > 0));
    }

    #[test]
    fn test_sample_quiz_answers() {
        let quiz = sample_quiz();
        assert_eq!(quiz.questions.len(), 2);
        assert!(quiz.questions.iter().all(|q| q.is_correct(1)));
    }

    #[test]
    fn test_sample_mind_map_tree() {
        let map = sample_mind_map();
        assert_eq!(map.roots().count(), 4);
        assert_eq!(map.children_of("spaced").count(), 2);
        assert_eq!(map.children_of("interleaving").count(), 0);
    }
}

//! Quiz list entries and question sets.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum QuizStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl QuizStatus {
    pub fn label(&self) -> &'static str {
        match self {
            QuizStatus::NotStarted => "Not Started",
            QuizStatus::InProgress => "In Progress",
            QuizStatus::Completed => "Completed",
        }
    }
}

/// One row of the quiz list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: u32,
    pub title: String,
    pub question_count: u32,
    pub completed: u32,
    /// Percentage score, 0 when not started
    pub score: u32,
    pub status: QuizStatus,
}

impl QuizSummary {
    /// Completion in percent of answered questions.
    pub fn progress(&self) -> u32 {
        if self.question_count == 0 {
            return 0;
        }
        self.completed * 100 / self.question_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSet {
    pub id: u32,
    pub title: String,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(QuizStatus::InProgress.to_string(), "in-progress");
        assert_eq!("not-started".parse::<QuizStatus>().unwrap(), QuizStatus::NotStarted);
        assert_eq!(QuizStatus::Completed.label(), "Completed");
    }

    #[test]
    fn test_progress() {
        let summary = QuizSummary {
            id: 1,
            title: "Chapter 1".into(),
            question_count: 10,
            completed: 8,
            score: 80,
            status: QuizStatus::InProgress,
        };
        assert_eq!(summary.progress(), 80);
    }
}

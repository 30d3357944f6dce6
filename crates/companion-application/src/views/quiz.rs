//! Quiz side panel.

use companion_core::panel::{Question, QuizSet, QuizSummary};
use companion_infrastructure::samples::{quiz_summaries, sample_quiz};

/// Feedback shown after an answer is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub correct: bool,
    pub correct_answer: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizProgress {
    /// Index of the question now shown
    Question(usize),
    Finished { correct: usize, total: usize },
}

/// A quiz being taken, one question at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    pub quiz: QuizSet,
    pub index: usize,
    pub selected: Option<usize>,
    pub submitted: bool,
    pub correct: usize,
}

impl QuizSession {
    pub fn new(quiz: QuizSet) -> Self {
        Self {
            quiz,
            index: 0,
            selected: None,
            submitted: false,
            correct: 0,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.index)
    }

    pub fn total(&self) -> usize {
        self.quiz.questions.len()
    }

    /// Answers can be changed until submitted.
    pub fn select_answer(&mut self, answer: usize) -> bool {
        let in_range = self
            .current_question()
            .is_some_and(|q| answer < q.options.len());
        if self.submitted || !in_range {
            return false;
        }
        self.selected = Some(answer);
        true
    }

    pub fn submit(&mut self) -> Option<AnswerResult> {
        if self.submitted {
            return None;
        }
        let answer = self.selected?;
        let question = self.quiz.questions.get(self.index)?;
        let result = AnswerResult {
            correct: question.is_correct(answer),
            correct_answer: question.correct_answer,
            explanation: question.explanation.clone(),
        };
        if result.correct {
            self.correct += 1;
        }
        self.submitted = true;
        Some(result)
    }

    /// Moves past a submitted question.
    pub fn next(&mut self) -> Option<QuizProgress> {
        if !self.submitted {
            return None;
        }
        if self.index + 1 < self.total() {
            self.index += 1;
            self.selected = None;
            self.submitted = false;
            Some(QuizProgress::Question(self.index))
        } else {
            Some(QuizProgress::Finished {
                correct: self.correct,
                total: self.total(),
            })
        }
    }
}

pub struct QuizView {
    summaries: Vec<QuizSummary>,
    session: Option<QuizSession>,
}

impl Default for QuizView {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizView {
    pub fn new() -> Self {
        Self {
            summaries: quiz_summaries(),
            session: None,
        }
    }

    pub fn summaries(&self) -> &[QuizSummary] {
        &self.summaries
    }

    /// Starts the quiz listed under `quiz_id`.
    ///
    /// Every listed quiz currently opens the bundled question set.
    pub fn start(&mut self, quiz_id: u32) -> bool {
        let Some(summary) = self.summaries.iter().find(|s| s.id == quiz_id) else {
            tracing::warn!(quiz_id, "[Quiz] Unknown quiz");
            return false;
        };
        let mut quiz = sample_quiz();
        quiz.title = summary.title.clone();
        self.session = Some(QuizSession::new(quiz));
        true
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref()?.current_question()
    }

    pub fn select_answer(&mut self, answer: usize) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.select_answer(answer))
    }

    pub fn submit(&mut self) -> Option<AnswerResult> {
        self.session.as_mut()?.submit()
    }

    pub fn next(&mut self) -> Option<QuizProgress> {
        self.session.as_mut()?.next()
    }

    pub fn correct_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.correct)
    }

    pub fn back_to_list(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_run() {
        let mut view = QuizView::new();
        assert!(view.start(2));
        assert_eq!(view.session().unwrap().quiz.title, "Midterm Review");

        assert!(view.select_answer(1));
        let result = view.submit().unwrap();
        assert!(result.correct);
        assert_eq!(view.next(), Some(QuizProgress::Question(1)));

        assert!(view.select_answer(0));
        let result = view.submit().unwrap();
        assert!(!result.correct);
        assert_eq!(result.correct_answer, 1);
        assert_eq!(view.next(), Some(QuizProgress::Finished { correct: 1, total: 2 }));
        assert_eq!(view.correct_count(), 1);

        view.back_to_list();
        assert!(view.session().is_none());
    }

    #[test]
    fn test_submit_requires_selection_and_locks_answer() {
        let mut view = QuizView::new();
        view.start(1);
        assert!(view.submit().is_none());
        assert!(view.next().is_none());
        assert!(!view.select_answer(9));

        view.select_answer(1);
        view.submit();
        assert!(!view.select_answer(2));
        assert!(view.submit().is_none());
    }

    #[test]
    fn test_unknown_quiz() {
        let mut view = QuizView::new();
        assert!(!view.start(42));
        assert!(view.current_question().is_none());
    }
}

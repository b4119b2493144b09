//! Quiz session state machine.
//!
//! A session walks an immutable question list one question at a time:
//! pick an option, lock it in with [`QuizSession::submit`], then
//! [`QuizSession::advance`]. Scoring is guarded by the submitted flag so
//! repeated submissions cannot inflate the score. Ending a quiz is
//! modeled as dropping the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::QuizQuestion;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizSessionError {
    #[error("the quiz is already complete")]
    Completed,

    #[error("the current question was already submitted")]
    AlreadySubmitted,

    #[error("the current question has not been submitted yet")]
    NotSubmitted,

    #[error("no selectable option labelled '{0}' on the current question")]
    UnknownLabel(char),
}

pub type Result<T> = std::result::Result<T, QuizSessionError>;

/// What [`QuizSession::submit`] locked in, for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub correct: bool,
    pub correct_label: char,
    pub explanation: String,
}

/// Progress through a generated list of quiz questions.
///
/// Every operation either succeeds or returns an error leaving the
/// session untouched; no sequence of calls can drive `score` or the
/// question index out of bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current: usize,
    score: usize,
    submitted: bool,
    selected: Option<char>,
}

impl QuizSession {
    /// Start a session over `questions`. An empty list is immediately
    /// complete.
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            submitted: false,
            selected: None,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Index of the question currently shown; equals `total()` once the
    /// session is complete.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn selected(&self) -> Option<char> {
        self.selected
    }

    /// The question awaiting an answer, `None` once complete.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    /// Pick an option for the current question. Only valid before
    /// submission; re-picking replaces the previous choice.
    pub fn select_answer(&mut self, label: char) -> Result<()> {
        let question = self.current_question().ok_or(QuizSessionError::Completed)?;
        if self.submitted {
            return Err(QuizSessionError::AlreadySubmitted);
        }
        let label = label.to_ascii_uppercase();
        if !question.has_label(label) {
            return Err(QuizSessionError::UnknownLabel(label));
        }
        self.selected = Some(label);
        Ok(())
    }

    /// Lock in the selected answer and score it.
    ///
    /// A question scores at most once: a second `submit` before
    /// `advance` fails without touching the score. No selection counts
    /// as a wrong answer.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let question = self.current_question().ok_or(QuizSessionError::Completed)?;
        if self.submitted {
            return Err(QuizSessionError::AlreadySubmitted);
        }

        let correct_label = question.correct_label;
        let explanation = question.explanation.clone();
        let correct = self.selected == Some(correct_label);

        self.submitted = true;
        if correct {
            self.score += 1;
        }

        Ok(SubmitOutcome {
            correct,
            correct_label,
            explanation,
        })
    }

    /// Move on to the next question; only valid after `submit`.
    pub fn advance(&mut self) -> Result<()> {
        if self.is_complete() {
            return Err(QuizSessionError::Completed);
        }
        if !self.submitted {
            return Err(QuizSessionError::NotSubmitted);
        }
        self.current += 1;
        self.submitted = false;
        self.selected = None;
        Ok(())
    }

    /// Start over with the same questions, valid in any state.
    pub fn restart(&mut self) {
        self.current = 0;
        self.score = 0;
        self.submitted = false;
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AnswerOption, QuestionKind};

    fn question(correct: char) -> QuizQuestion {
        QuizQuestion {
            question: "What is 1+1?".to_string(),
            kind: QuestionKind::MultipleChoice,
            options: vec![
                AnswerOption::new('A', "1"),
                AnswerOption::new('B', "2"),
                AnswerOption::new('C', "3"),
                AnswerOption::new('D', "4"),
            ],
            correct_label: correct,
            explanation: "basic math".to_string(),
        }
    }

    fn session(n: usize) -> QuizSession {
        QuizSession::new((0..n).map(|_| question('B')).collect())
    }

    #[test]
    fn test_empty_session_is_immediately_complete() {
        let mut s = session(0);
        assert!(s.is_complete());
        assert_eq!(s.submit().unwrap_err(), QuizSessionError::Completed);
        assert_eq!(s.select_answer('A').unwrap_err(), QuizSessionError::Completed);
    }

    #[test]
    fn test_correct_answer_scores_once() {
        let mut s = session(1);
        s.select_answer('b').unwrap();
        let outcome = s.submit().unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.correct_label, 'B');
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_submit_is_idempotent_on_score() {
        let mut s = session(1);
        s.select_answer('B').unwrap();
        s.submit().unwrap();
        assert_eq!(s.submit().unwrap_err(), QuizSessionError::AlreadySubmitted);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_wrong_or_missing_answer_does_not_score() {
        let mut s = session(2);
        s.select_answer('A').unwrap();
        let outcome = s.submit().unwrap();
        assert!(!outcome.correct);
        assert_eq!(s.score(), 0);

        s.advance().unwrap();
        // No selection at all counts as incorrect.
        assert!(!s.submit().unwrap().correct);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_select_after_submit_is_rejected_without_corruption() {
        let mut s = session(1);
        s.select_answer('A').unwrap();
        s.submit().unwrap();
        assert_eq!(s.select_answer('B').unwrap_err(), QuizSessionError::AlreadySubmitted);
        assert_eq!(s.selected(), Some('A'));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_advance_requires_submit() {
        let mut s = session(2);
        assert_eq!(s.advance().unwrap_err(), QuizSessionError::NotSubmitted);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_advance_clears_selection_and_submitted() {
        let mut s = session(2);
        s.select_answer('B').unwrap();
        s.submit().unwrap();
        s.advance().unwrap();
        assert_eq!(s.current_index(), 1);
        assert!(!s.is_submitted());
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_last_advance_completes_the_session() {
        let mut s = session(1);
        s.select_answer('B').unwrap();
        s.submit().unwrap();
        s.advance().unwrap();
        assert!(s.is_complete());
        assert_eq!(s.current_index(), s.total());
        assert_eq!(s.submit().unwrap_err(), QuizSessionError::Completed);
        assert_eq!(s.select_answer('A').unwrap_err(), QuizSessionError::Completed);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let mut s = session(1);
        assert_eq!(s.select_answer('E').unwrap_err(), QuizSessionError::UnknownLabel('E'));
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        let mut s = session(3);
        for _ in 0..3 {
            let _ = s.select_answer('B');
            s.submit().unwrap();
            let _ = s.submit();
            s.advance().unwrap();
        }
        assert_eq!(s.score(), 3);
        assert!(s.is_complete());
    }

    #[test]
    fn test_restart_resets_exactly() {
        let mut s = session(2);
        s.select_answer('B').unwrap();
        s.submit().unwrap();
        s.advance().unwrap();
        s.select_answer('A').unwrap();

        s.restart();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert!(!s.is_submitted());
        assert_eq!(s.selected(), None);
        assert!(!s.is_complete());

        // Restart from the completed state as well.
        s.select_answer('B').unwrap();
        s.submit().unwrap();
        s.advance().unwrap();
        s.submit().unwrap();
        s.advance().unwrap();
        assert!(s.is_complete());
        s.restart();
        assert_eq!((s.current_index(), s.score(), s.is_submitted()), (0, 0, false));
    }
}

//! One-question-at-a-time quiz sessions.

mod session;

pub use session::{QuizSession, QuizSessionError, SubmitOutcome};

//! Parsing of free-text model output into structured records.
//!
//! Quiz questions and flashcards are requested from the model in a fixed
//! textual layout (see [`crate::ai::prompts`]). The layout is a prompt
//! contract, not a formal grammar, so parsing is maximally permissive:
//! malformed blocks are dropped with a diagnostic and the remaining
//! blocks still parse. Neither entry point can fail.

mod models;
mod response;

pub use models::{AnswerOption, Flashcard, QuestionKind, QuizQuestion};
pub use response::{parse_flashcard_text, parse_quiz_text};

//! Chat over the indexed documents: history models and retrieval QA.

mod models;
mod qa;

pub use models::{ChatHistory, ChatTurn};
pub use qa::{answer_question, Answer, QaError};

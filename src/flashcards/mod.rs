//! Flashcard review sessions.

mod session;

pub use session::{FlashcardSession, FlashcardSessionError};

//! Flashcard session state machine.
//!
//! Purely positional navigation over an immutable card list: the front
//! of one card is shown at a time, the back stays hidden until revealed,
//! and moving in either direction hides it again. No scoring. Exiting is
//! modeled as dropping the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::Flashcard;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlashcardSessionError {
    #[error("already at the last card")]
    AtLastCard,

    #[error("already at the first card")]
    AtFirstCard,

    #[error("the session has no cards")]
    NoCards,
}

pub type Result<T> = std::result::Result<T, FlashcardSessionError>;

/// Progress through a generated list of flashcards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSession {
    cards: Vec<Flashcard>,
    current: usize,
    revealed: bool,
}

impl FlashcardSession {
    /// Start at the first card with its back hidden.
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            current: 0,
            revealed: false,
        }
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// The card currently shown, `None` for an empty session.
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.cards.get(self.current)
    }

    /// Show the back of the current card. Idempotent.
    pub fn reveal(&mut self) {
        if !self.cards.is_empty() {
            self.revealed = true;
        }
    }

    /// Move to the next card and hide its back.
    pub fn next(&mut self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(FlashcardSessionError::NoCards);
        }
        if self.current + 1 >= self.cards.len() {
            return Err(FlashcardSessionError::AtLastCard);
        }
        self.current += 1;
        self.revealed = false;
        Ok(())
    }

    /// Move to the previous card and hide its back.
    pub fn previous(&mut self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(FlashcardSessionError::NoCards);
        }
        if self.current == 0 {
            return Err(FlashcardSessionError::AtFirstCard);
        }
        self.current -= 1;
        self.revealed = false;
        Ok(())
    }
}

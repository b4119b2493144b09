//! AI study buddy core.
//!
//! Turns PDF documents into study material with a hosted language model:
//! retrieval-grounded question answering, summaries, flashcards and
//! quizzes. The model, embedding and moderation endpoints are reached
//! through injected traits so everything above them is testable offline.

pub mod ai;
pub mod chat;
pub mod config;
pub mod flashcards;
pub mod ingest;
pub mod parser;
pub mod quiz;
pub mod rag;
pub mod study;

pub use study::{StudyBuddy, StudyError};

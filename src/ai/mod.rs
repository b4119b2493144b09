//! Provider layer for the hosted model endpoints.
//!
//! Text generation and moderation are reached through the
//! [`TextGenerator`] and [`Moderator`] traits; the [`OpenAiProvider`]
//! and [`OpenAiModerator`] implementations talk to any OpenAI-compatible
//! gateway with blocking HTTP. Embeddings live in [`crate::rag`].

mod models;
mod moderation;
mod provider;
pub mod prompts;

pub use models::{AiConfig, ChatMessage, ChatResponse, ModerationVerdict};
pub use moderation::{Moderator, OpenAiModerator};
pub use provider::{AiError, OpenAiProvider, Result, TextGenerator};

pub(crate) use provider::{api_error, endpoint};

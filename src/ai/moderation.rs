//! Content moderation over an OpenAI-compatible `/moderations` endpoint.
//!
//! User chat input is checked before it reaches the question-answering
//! flow; quiz and flashcard parsing are unrelated to moderation.

use std::collections::BTreeMap;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::models::{AiConfig, ModerationVerdict};
use super::provider::{api_error, endpoint, AiError, Result};

/// A content moderation provider: text in, safe/unsafe verdict out.
pub trait Moderator {
    fn check(&self, input: &str) -> Result<ModerationVerdict>;
}

/// Blocking client for an OpenAI-compatible `/moderations` endpoint.
pub struct OpenAiModerator {
    client: Client,
    config: AiConfig,
}

#[derive(Serialize)]
struct ModerationRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct ModerationResponse {
    results: Vec<ModerationResult>,
}

#[derive(Deserialize)]
struct ModerationResult {
    flagged: bool,
    // BTreeMap keeps the flagged category listing stable.
    #[serde(default)]
    categories: BTreeMap<String, bool>,
}

impl OpenAiModerator {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

impl Moderator for OpenAiModerator {
    fn check(&self, input: &str) -> Result<ModerationVerdict> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AiError::MissingApiKey)?;

        let response = self
            .client
            .post(endpoint(&self.config.base_url, "moderations"))
            .bearer_auth(api_key)
            .json(&ModerationRequest {
                model: &self.config.moderation_model,
                input,
            })
            .send()?;

        if !response.status().is_success() {
            return Err(api_error(response));
        }

        let body: ModerationResponse = response.json()?;
        let result = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AiError::MalformedResponse("moderation response has no results".to_string()))?;

        let categories = result
            .categories
            .into_iter()
            .filter_map(|(name, hit)| hit.then_some(name))
            .collect();

        Ok(ModerationVerdict {
            flagged: result.flagged,
            categories,
        })
    }
}

//! Text generation over an OpenAI-compatible chat completions endpoint.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{AiConfig, ChatMessage, ChatResponse};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("No API key configured")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, AiError>;

/// A text generation provider: prompt in, raw model text out.
///
/// Implementations may fail for any transport or quota reason; callers
/// that feed the parser treat every failure as "no text to parse".
pub trait TextGenerator {
    fn complete(&self, messages: &[ChatMessage]) -> Result<ChatResponse>;
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiProvider {
    client: Client,
    config: AiConfig,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i64>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    model: Option<String>,
    choices: Vec<CompletionChoice>,
    usage: Option<CompletionUsage>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct CompletionUsage {
    total_tokens: Option<i64>,
}

impl OpenAiProvider {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

/// Join a base URL and an endpoint path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Read an error body for diagnostics, tolerating unreadable bodies.
pub(crate) fn api_error(response: reqwest::blocking::Response) -> AiError {
    let status = response.status().as_u16();
    let message = response.text().unwrap_or_default();
    AiError::Api { status, message }
}

impl TextGenerator for OpenAiProvider {
    fn complete(&self, messages: &[ChatMessage]) -> Result<ChatResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AiError::MissingApiKey)?;

        log::debug!(
            "requesting completion from {} ({} messages)",
            self.config.model,
            messages.len()
        );

        let response = self
            .client
            .post(endpoint(&self.config.base_url, "chat/completions"))
            .bearer_auth(api_key)
            .json(&CompletionRequest {
                model: &self.config.model,
                messages,
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            })
            .send()?;

        if !response.status().is_success() {
            return Err(api_error(response));
        }

        let body: CompletionResponse = response.json()?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::MalformedResponse("response has no choices".to_string()))?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            model: body.model.unwrap_or_else(|| self.config.model.clone()),
            tokens_used: body.usage.and_then(|u| u.total_tokens),
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("https://api.openai.com/v1", "chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            endpoint("https://gateway.example.com/", "moderations"),
            "https://gateway.example.com/moderations"
        );
    }

    #[test]
    fn test_missing_api_key_fails_before_any_request() {
        let provider = OpenAiProvider::new(AiConfig::default());
        let err = provider.complete(&[ChatMessage::user("hi")]).unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey));
    }
}

//! Embedding generation over an OpenAI-compatible `/embeddings` endpoint.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::ai::{api_error, endpoint, AiConfig, AiError, Result};

/// An embedding provider: texts in, one vector per text out, in input
/// order.
pub trait Embedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Blocking client for an OpenAI-compatible `/embeddings` endpoint.
pub struct OpenAiEmbedder {
    client: Client,
    config: AiConfig,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AiError::MissingApiKey)?;

        log::debug!(
            "embedding {} texts with {}",
            texts.len(),
            self.config.embedding_model
        );

        let response = self
            .client
            .post(endpoint(&self.config.base_url, "embeddings"))
            .bearer_auth(api_key)
            .json(&EmbeddingRequest {
                model: &self.config.embedding_model,
                input: texts,
            })
            .send()?;

        if !response.status().is_success() {
            return Err(api_error(response));
        }

        let body: EmbeddingResponse = response.json()?;
        if body.data.len() != texts.len() {
            return Err(AiError::MalformedResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                body.data.len()
            )));
        }

        // The API is allowed to return entries out of order.
        let mut data = body.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

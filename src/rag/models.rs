//! Data models for retrieval.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chunk of document text ready for embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub id: Uuid,
    /// Name of the source document (file name for uploaded PDFs)
    pub document: String,
    /// Index of this chunk within its document, for ordering
    pub chunk_index: u32,
    pub content: String,
}

impl Chunk {
    /// Create a new chunk with a generated ID.
    pub fn new(document: impl Into<String>, chunk_index: u32, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            document: document.into(),
            chunk_index,
            content: content.into(),
        }
    }
}

/// Result from a semantic search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSearchResult {
    pub chunk_id: String,
    pub document: String,
    /// The matched chunk content
    pub content: String,
    /// Similarity score (higher is more similar)
    pub score: f32,
}

//! Retrieval: embeddings and the vector index used for semantic search.

mod embedder;
mod index;
mod models;

pub use embedder::{Embedder, OpenAiEmbedder};
pub use index::{IndexStats, VectorIndex, VectorIndexError};
pub use models::{Chunk, SemanticSearchResult};

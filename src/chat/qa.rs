//! Retrieval-grounded question answering.

use thiserror::Error;

use crate::ai::{prompts, AiError, ChatMessage, TextGenerator};
use crate::rag::{Embedder, SemanticSearchResult, VectorIndex, VectorIndexError};

#[derive(Error, Debug)]
pub enum QaError {
    #[error("no documents have been indexed yet")]
    NoDocuments,

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Index(#[from] VectorIndexError),
}

pub type Result<T> = std::result::Result<T, QaError>;

/// An answer together with the chunks it was grounded in.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub content: String,
    pub sources: Vec<SemanticSearchResult>,
}

/// Answer a question from the `top_k` most similar indexed chunks.
///
/// The question is embedded, matched against the index, and the
/// retrieved chunks become the only context of a single completion
/// call. Questions are answered statelessly; conversation history is a
/// display concern of the caller.
pub fn answer_question(
    index: &VectorIndex,
    embedder: &dyn Embedder,
    generator: &dyn TextGenerator,
    question: &str,
    top_k: usize,
) -> Result<Answer> {
    if index.stats()?.chunk_count == 0 {
        return Err(QaError::NoDocuments);
    }

    let query = embedder.embed(&[question.to_string()])?;
    let query_embedding = query
        .first()
        .ok_or_else(|| AiError::MalformedResponse("no embedding for query".to_string()))?;

    let sources = index.search(query_embedding, top_k)?;
    let context: Vec<String> = sources.iter().map(|s| s.content.clone()).collect();

    log::debug!(
        "answering from {} retrieved chunks (top score {:.3})",
        sources.len(),
        sources.first().map(|s| s.score).unwrap_or(0.0)
    );

    let prompt = prompts::question_answer(&context, question);
    let response = generator.complete(&[ChatMessage::user(prompt)])?;

    Ok(Answer {
        content: response.content,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ChatResponse, Result as AiResult};
    use crate::rag::Chunk;

    /// Embeds to a fixed axis per known keyword.
    struct KeywordEmbedder;

    impl Embedder for KeywordEmbedder {
        fn embed(&self, texts: &[String]) -> AiResult<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    if t.contains("cat") {
                        vec![1.0, 0.0]
                    } else {
                        vec![0.0, 1.0]
                    }
                })
                .collect())
        }
    }

    /// Echoes the prompt back so tests can inspect it.
    struct EchoGenerator;

    impl TextGenerator for EchoGenerator {
        fn complete(&self, messages: &[ChatMessage]) -> AiResult<ChatResponse> {
            Ok(ChatResponse {
                content: messages[0].content.clone(),
                model: "mock".to_string(),
                tokens_used: None,
                finish_reason: None,
            })
        }
    }

    fn indexed() -> (tempfile::TempDir, VectorIndex) {
        let dir = tempfile::tempdir().unwrap();
        let mut index = VectorIndex::open(&dir.path().join("index.sqlite3")).unwrap();
        index
            .add_chunks(
                &[
                    Chunk::new("pets.pdf", 0, "cats purr"),
                    Chunk::new("pets.pdf", 1, "dogs bark"),
                ],
                &[vec![1.0, 0.0], vec![0.0, 1.0]],
            )
            .unwrap();
        (dir, index)
    }

    #[test]
    fn test_empty_index_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let index = VectorIndex::open(&dir.path().join("index.sqlite3")).unwrap();
        let err = answer_question(&index, &KeywordEmbedder, &EchoGenerator, "anything", 4)
            .unwrap_err();
        assert!(matches!(err, QaError::NoDocuments));
    }

    #[test]
    fn test_answer_uses_most_similar_chunk_as_context() {
        let (_dir, index) = indexed();
        let answer =
            answer_question(&index, &KeywordEmbedder, &EchoGenerator, "what do cats do?", 1)
                .unwrap();
        assert!(answer.content.contains("cats purr"));
        assert!(!answer.content.contains("dogs bark"));
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].document, "pets.pdf");
    }
}

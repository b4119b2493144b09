//! The study buddy orchestrator.
//!
//! Wires document ingestion, chunking, embedding and the index together
//! with the generation features built on top of them. All providers are
//! injected at construction so the orchestrator runs against mocks in
//! tests and against the OpenAI-compatible clients in the app.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ai::{prompts, AiError, ChatMessage, Moderator, TextGenerator};
use crate::chat::{self, Answer, QaError};
use crate::ingest::{self, IngestError};
use crate::parser::{self, Flashcard, QuizQuestion};
use crate::rag::{Chunk, Embedder, IndexStats, VectorIndex, VectorIndexError};

/// Chunk-count threshold above which summaries are produced in two
/// passes (per-chunk summaries, then a combining pass).
const MAP_REDUCE_THRESHOLD: usize = 5;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Index(#[from] VectorIndexError),

    #[error(transparent)]
    Qa(#[from] QaError),

    #[error("no documents have been processed yet")]
    NoDocuments,

    #[error("input was flagged by moderation")]
    InputFlagged,
}

pub type Result<T> = std::result::Result<T, StudyError>;

/// One user's study buddy over one document corpus.
///
/// Owns the vector index and caches the corpus chunks after processing;
/// quiz/flashcard/summary generation reads the cache, question
/// answering goes through retrieval. Owned by exactly one caller at a
/// time (sessions handed out by the generate operations are independent
/// values).
pub struct StudyBuddy {
    generator: Box<dyn TextGenerator>,
    embedder: Box<dyn Embedder>,
    moderator: Box<dyn Moderator>,
    index: VectorIndex,
    chunks: Vec<String>,
    top_k: usize,
}

impl StudyBuddy {
    /// Build a study buddy over an opened index, restoring the chunk
    /// cache from any previously processed documents.
    pub fn new(
        generator: Box<dyn TextGenerator>,
        embedder: Box<dyn Embedder>,
        moderator: Box<dyn Moderator>,
        index: VectorIndex,
        top_k: usize,
    ) -> Result<Self> {
        let chunks = index
            .load_chunks()?
            .into_iter()
            .map(|c| c.content)
            .collect();

        Ok(Self {
            generator,
            embedder,
            moderator,
            index,
            chunks,
            top_k,
        })
    }

    /// Number of chunks in the processed corpus.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn stats(&self) -> Result<IndexStats> {
        Ok(self.index.stats()?)
    }

    pub fn index_path(&self) -> &Path {
        self.index.db_path()
    }

    /// Extract, chunk, embed and index the given PDF files. Returns the
    /// number of chunks added across all documents.
    pub fn process_documents(&mut self, paths: &[PathBuf]) -> Result<usize> {
        let mut added = 0;

        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let text = ingest::extract_pdf_text(path)?;
            let pieces = ingest::chunk_text(&text);
            log::info!("{}: {} chunks", name, pieces.len());

            let embeddings = self.embedder.embed(&pieces)?;
            let chunks: Vec<Chunk> = pieces
                .iter()
                .enumerate()
                .map(|(i, content)| Chunk::new(name.clone(), i as u32, content.clone()))
                .collect();
            self.index.add_chunks(&chunks, &embeddings)?;

            added += pieces.len();
        }

        // Re-processing a document replaces its chunks in the index, so
        // the cache is rebuilt rather than extended.
        self.chunks = self
            .index
            .load_chunks()?
            .into_iter()
            .map(|c| c.content)
            .collect();

        Ok(added)
    }

    /// Summarize the processed corpus.
    ///
    /// Small corpora are summarized in one call; larger ones get a
    /// per-chunk pass followed by a combining pass so no single prompt
    /// outgrows the model's context.
    pub fn generate_summary(&self) -> Result<String> {
        if self.chunks.is_empty() {
            return Err(StudyError::NoDocuments);
        }

        if self.chunks.len() <= MAP_REDUCE_THRESHOLD {
            let prompt = prompts::summary(&self.chunks.join("\n\n"));
            let response = self.generator.complete(&[ChatMessage::user(prompt)])?;
            return Ok(response.content);
        }

        let mut partials = Vec::with_capacity(self.chunks.len());
        for (i, chunk) in self.chunks.iter().enumerate() {
            log::info!("summarizing chunk {} of {}", i + 1, self.chunks.len());
            let response = self
                .generator
                .complete(&[ChatMessage::user(prompts::summary(chunk))])?;
            partials.push(response.content);
        }

        let response = self
            .generator
            .complete(&[ChatMessage::user(prompts::combine_summaries(&partials))])?;
        Ok(response.content)
    }

    /// Generate quiz questions from every chunk of the corpus.
    ///
    /// A chunk whose completion fails or parses to nothing contributes
    /// zero questions and is logged; the rest of the corpus still
    /// produces questions. The natural surviving count is returned, in
    /// corpus order.
    pub fn generate_quiz(&self) -> Result<Vec<QuizQuestion>> {
        if self.chunks.is_empty() {
            return Err(StudyError::NoDocuments);
        }

        let mut questions = Vec::new();
        for (i, chunk) in self.chunks.iter().enumerate() {
            log::info!("generating questions for chunk {} of {}", i + 1, self.chunks.len());

            let text = match self
                .generator
                .complete(&[ChatMessage::user(prompts::quiz(chunk))])
            {
                Ok(response) => response.content,
                Err(e) => {
                    log::warn!("quiz generation failed for chunk {}: {}", i + 1, e);
                    continue;
                }
            };

            let parsed = parser::parse_quiz_text(&text);
            if parsed.is_empty() {
                log::warn!(
                    "chunk {} produced no well-formed questions; raw output: {:?}",
                    i + 1,
                    text
                );
            }
            questions.extend(parsed);
        }

        Ok(questions)
    }

    /// Generate flashcards from every chunk of the corpus, with the
    /// same per-chunk failure tolerance as quiz generation.
    pub fn generate_flashcards(&self) -> Result<Vec<Flashcard>> {
        if self.chunks.is_empty() {
            return Err(StudyError::NoDocuments);
        }

        let mut cards = Vec::new();
        for (i, chunk) in self.chunks.iter().enumerate() {
            log::info!("generating flashcards for chunk {} of {}", i + 1, self.chunks.len());

            let text = match self
                .generator
                .complete(&[ChatMessage::user(prompts::flashcards(chunk))])
            {
                Ok(response) => response.content,
                Err(e) => {
                    log::warn!("flashcard generation failed for chunk {}: {}", i + 1, e);
                    continue;
                }
            };

            let parsed = parser::parse_flashcard_text(&text);
            if parsed.is_empty() {
                log::warn!(
                    "chunk {} produced no well-formed flashcards; raw output: {:?}",
                    i + 1,
                    text
                );
            }
            cards.extend(parsed);
        }

        Ok(cards)
    }

    /// Answer a question about the documents.
    ///
    /// The question goes through moderation first; flagged input never
    /// reaches the generator.
    pub fn ask(&self, question: &str) -> Result<Answer> {
        let verdict = self.moderator.check(question)?;
        if verdict.flagged {
            log::warn!("question flagged by moderation: {:?}", verdict.categories);
            return Err(StudyError::InputFlagged);
        }

        Ok(chat::answer_question(
            &self.index,
            self.embedder.as_ref(),
            self.generator.as_ref(),
            question,
            self.top_k,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::ai::{ChatResponse, ModerationVerdict, Result as AiResult};

    /// Replays scripted completions in order.
    struct ScriptedGenerator {
        outputs: RefCell<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(outputs: Vec<&str>) -> Self {
            Self {
                outputs: RefCell::new(outputs.into_iter().rev().map(String::from).collect()),
            }
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn complete(&self, _messages: &[ChatMessage]) -> AiResult<ChatResponse> {
            let content = self.outputs.borrow_mut().pop().unwrap_or_default();
            Ok(ChatResponse {
                content,
                model: "mock".to_string(),
                tokens_used: None,
                finish_reason: None,
            })
        }
    }

    struct UnitEmbedder;

    impl Embedder for UnitEmbedder {
        fn embed(&self, texts: &[String]) -> AiResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }
    }

    /// Flags any input containing the marker word.
    struct MarkerModerator;

    impl Moderator for MarkerModerator {
        fn check(&self, input: &str) -> AiResult<ModerationVerdict> {
            let flagged = input.contains("unsafe");
            Ok(ModerationVerdict {
                flagged,
                categories: if flagged { vec!["marker".to_string()] } else { Vec::new() },
            })
        }
    }

    fn buddy_with(generator: ScriptedGenerator, chunks: &[&str]) -> (tempfile::TempDir, StudyBuddy) {
        let dir = tempfile::tempdir().unwrap();
        let mut index = VectorIndex::open(&dir.path().join("index.sqlite3")).unwrap();
        if !chunks.is_empty() {
            let records: Vec<Chunk> = chunks
                .iter()
                .enumerate()
                .map(|(i, c)| Chunk::new("doc.pdf", i as u32, *c))
                .collect();
            let embeddings = vec![vec![1.0, 0.0]; chunks.len()];
            index.add_chunks(&records, &embeddings).unwrap();
        }

        let buddy = StudyBuddy::new(
            Box::new(generator),
            Box::new(UnitEmbedder),
            Box::new(MarkerModerator),
            index,
            4,
        )
        .unwrap();
        (dir, buddy)
    }

    const QUESTION_BLOCK: &str = "Question: What is 1+1?\n\
                                  Type: multiple_choice\n\
                                  Options: A) 1, B) 2, C) 3, D) 4\n\
                                  Correct Answer: B\n\
                                  Explanation: basic math";

    #[test]
    fn test_new_restores_chunk_cache_from_index() {
        let (_dir, buddy) = buddy_with(ScriptedGenerator::new(vec![]), &["one", "two"]);
        assert_eq!(buddy.chunk_count(), 2);
    }

    #[test]
    fn test_generation_without_documents_is_an_error() {
        let (_dir, buddy) = buddy_with(ScriptedGenerator::new(vec![]), &[]);
        assert!(matches!(buddy.generate_summary(), Err(StudyError::NoDocuments)));
        assert!(matches!(buddy.generate_quiz(), Err(StudyError::NoDocuments)));
        assert!(matches!(buddy.generate_flashcards(), Err(StudyError::NoDocuments)));
    }

    #[test]
    fn test_small_corpus_summarizes_in_one_call() {
        let (_dir, buddy) = buddy_with(
            ScriptedGenerator::new(vec!["a short summary"]),
            &["one", "two"],
        );
        assert_eq!(buddy.generate_summary().unwrap(), "a short summary");
    }

    #[test]
    fn test_large_corpus_summarizes_in_two_passes() {
        let chunks = ["c1", "c2", "c3", "c4", "c5", "c6"];
        let generator =
            ScriptedGenerator::new(vec!["s1", "s2", "s3", "s4", "s5", "s6", "combined"]);
        let (_dir, buddy) = buddy_with(generator, &chunks);

        let summary = buddy.generate_summary().unwrap();
        assert_eq!(summary, "combined");
    }

    #[test]
    fn test_quiz_collects_questions_across_chunks() {
        let generator = ScriptedGenerator::new(vec![QUESTION_BLOCK, "not parseable at all"]);
        let (_dir, buddy) = buddy_with(generator, &["one", "two"]);

        let questions = buddy.generate_quiz().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_label, 'B');
    }

    #[test]
    fn test_flashcards_collect_across_chunks() {
        let generator = ScriptedGenerator::new(vec![
            "Front: A?\nBack: a",
            "Front: B?\nBack: b\n\nFront: C?\nBack: c",
        ]);
        let (_dir, buddy) = buddy_with(generator, &["one", "two"]);

        let cards = buddy.generate_flashcards().unwrap();
        assert_eq!(cards.len(), 3);
    }

    #[test]
    fn test_flagged_question_never_reaches_the_generator() {
        let generator = ScriptedGenerator::new(vec!["should not be used"]);
        let (_dir, buddy) = buddy_with(generator, &["one"]);

        let err = buddy.ask("something unsafe").unwrap_err();
        assert!(matches!(err, StudyError::InputFlagged));
    }

    #[test]
    fn test_ask_answers_from_context() {
        let generator = ScriptedGenerator::new(vec!["an answer"]);
        let (_dir, buddy) = buddy_with(generator, &["cats purr"]);

        let answer = buddy.ask("what do cats do?").unwrap();
        assert_eq!(answer.content, "an answer");
        assert_eq!(answer.sources.len(), 1);
    }

    #[test]
    fn test_ask_without_documents() {
        let (_dir, buddy) = buddy_with(ScriptedGenerator::new(vec![]), &[]);
        let err = buddy.ask("anything").unwrap_err();
        assert!(matches!(err, StudyError::Qa(QaError::NoDocuments)));
    }
}

//! Vector index for semantic search, stored in SQLite.
//!
//! Embeddings are kept as little-endian f32 blobs and searched with
//! brute-force cosine similarity, which is plenty for a per-user corpus
//! of study documents.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use thiserror::Error;
use uuid::Uuid;

use super::models::{Chunk, SemanticSearchResult};

#[derive(Error, Debug)]
pub enum VectorIndexError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chunk count ({chunks}) does not match embedding count ({embeddings})")]
    CountMismatch { chunks: usize, embeddings: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, VectorIndexError>;

/// Statistics about the vector index.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub chunk_count: u64,
    pub document_count: u64,
    pub dimensions: u32,
}

/// SQLite-backed vector index over document chunks.
pub struct VectorIndex {
    conn: Connection,
    db_path: PathBuf,
}

impl VectorIndex {
    /// Open (or create) an index at the given path.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS chunks (
                id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                chunk_index INTEGER NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS embeddings (
                chunk_id TEXT PRIMARY KEY,
                embedding BLOB NOT NULL,
                dimensions INTEGER NOT NULL,
                FOREIGN KEY (chunk_id) REFERENCES chunks(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_chunks_document ON chunks(document);
            "#,
        )?;

        Ok(Self {
            conn,
            db_path: db_path.to_path_buf(),
        })
    }

    /// Add chunks with their pre-computed embeddings.
    ///
    /// Re-adding a document first removes its previous chunks, so
    /// re-processing the same file does not duplicate content.
    pub fn add_chunks(&mut self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(VectorIndexError::CountMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }
        if chunks.is_empty() {
            return Ok(());
        }

        let expected = embeddings[0].len();
        for embedding in embeddings {
            if embedding.len() != expected {
                return Err(VectorIndexError::DimensionMismatch {
                    expected,
                    actual: embedding.len(),
                });
            }
        }

        let tx = self.conn.transaction()?;

        let mut documents: Vec<&str> = chunks.iter().map(|c| c.document.as_str()).collect();
        documents.sort_unstable();
        documents.dedup();
        for document in documents {
            tx.execute(
                "DELETE FROM embeddings WHERE chunk_id IN (SELECT id FROM chunks WHERE document = ?1)",
                params![document],
            )?;
            tx.execute("DELETE FROM chunks WHERE document = ?1", params![document])?;
        }

        for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
            tx.execute(
                "INSERT INTO chunks (id, document, chunk_index, content) VALUES (?1, ?2, ?3, ?4)",
                params![
                    chunk.id.to_string(),
                    chunk.document,
                    chunk.chunk_index,
                    chunk.content,
                ],
            )?;

            let blob: Vec<u8> = embedding.iter().flat_map(|f| f.to_le_bytes()).collect();
            tx.execute(
                "INSERT INTO embeddings (chunk_id, embedding, dimensions) VALUES (?1, ?2, ?3)",
                params![chunk.id.to_string(), blob, embedding.len() as i64],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Search for the chunks most similar to a query embedding.
    pub fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SemanticSearchResult>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.id, c.document, c.content, e.embedding
            FROM chunks c
            JOIN embeddings e ON c.id = e.chunk_id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut scored: Vec<SemanticSearchResult> = rows
            .into_iter()
            .map(|(chunk_id, document, content, blob)| {
                let embedding = deserialize_embedding(&blob);
                let score = cosine_similarity(query_embedding, &embedding);
                SemanticSearchResult {
                    chunk_id,
                    document,
                    content,
                    score,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);
        Ok(scored)
    }

    /// All chunks in document/position order, for rebuilding the text
    /// corpus from a previously built index.
    pub fn load_chunks(&self) -> Result<Vec<Chunk>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, document, chunk_index, content FROM chunks ORDER BY document, chunk_index",
        )?;

        let chunks = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                Ok(Chunk {
                    id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::new_v4()),
                    document: row.get(1)?,
                    chunk_index: row.get(2)?,
                    content: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(chunks)
    }

    /// Remove everything from the index.
    pub fn clear(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM embeddings", [])?;
        tx.execute("DELETE FROM chunks", [])?;
        tx.commit()?;
        Ok(())
    }

    /// Get statistics about the index.
    pub fn stats(&self) -> Result<IndexStats> {
        let chunk_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))?;

        let document_count: i64 =
            self.conn
                .query_row("SELECT COUNT(DISTINCT document) FROM chunks", [], |row| {
                    row.get(0)
                })?;

        let dimensions: i64 = self
            .conn
            .query_row(
                "SELECT COALESCE(MAX(dimensions), 0) FROM embeddings",
                [],
                |row| row.get(0),
            )?;

        Ok(IndexStats {
            chunk_count: chunk_count as u64,
            document_count: document_count as u64,
            dimensions: dimensions as u32,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Deserialize an embedding from its little-endian blob form.
fn deserialize_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Cosine similarity between two vectors; 0.0 on length mismatch.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = (norm_a * norm_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, VectorIndex) {
        let dir = tempfile::tempdir().unwrap();
        let index = VectorIndex::open(&dir.path().join("index.sqlite3")).unwrap();
        (dir, index)
    }

    fn chunk(document: &str, i: u32, content: &str) -> Chunk {
        Chunk::new(document, i, content)
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &[1.0, 0.0, 0.0]) - 1.0).abs() < 0.001);
        assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 0.001);
        assert!((cosine_similarity(&a, &[-1.0, 0.0, 0.0]) + 1.0).abs() < 0.001);
        assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_embedding_round_trip() {
        let values = vec![1.0f32, -2.5, 3.25];
        let bytes: Vec<u8> = values.iter().flat_map(|f| f.to_le_bytes()).collect();
        assert_eq!(deserialize_embedding(&bytes), values);
    }

    #[test]
    fn test_search_ranks_by_similarity() {
        let (_dir, mut index) = open_temp();
        let chunks = vec![
            chunk("notes.pdf", 0, "about cats"),
            chunk("notes.pdf", 1, "about dogs"),
        ];
        index
            .add_chunks(&chunks, &[vec![1.0, 0.0], vec![0.0, 1.0]])
            .unwrap();

        let results = index.search(&[0.9, 0.1], 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "about cats");
        assert!(results[0].score > results[1].score);

        let top_only = index.search(&[0.9, 0.1], 1).unwrap();
        assert_eq!(top_only.len(), 1);
    }

    #[test]
    fn test_readding_a_document_replaces_its_chunks() {
        let (_dir, mut index) = open_temp();
        index
            .add_chunks(&[chunk("a.pdf", 0, "old")], &[vec![1.0, 0.0]])
            .unwrap();
        index
            .add_chunks(&[chunk("a.pdf", 0, "new")], &[vec![1.0, 0.0]])
            .unwrap();

        let stats = index.stats().unwrap();
        assert_eq!(stats.chunk_count, 1);
        assert_eq!(index.load_chunks().unwrap()[0].content, "new");
    }

    #[test]
    fn test_count_and_dimension_mismatches_are_rejected() {
        let (_dir, mut index) = open_temp();
        let chunks = vec![chunk("a.pdf", 0, "x"), chunk("a.pdf", 1, "y")];

        let err = index.add_chunks(&chunks, &[vec![1.0]]).unwrap_err();
        assert!(matches!(err, VectorIndexError::CountMismatch { .. }));

        let err = index
            .add_chunks(&chunks, &[vec![1.0, 0.0], vec![1.0]])
            .unwrap_err();
        assert!(matches!(err, VectorIndexError::DimensionMismatch { .. }));

        assert_eq!(index.stats().unwrap().chunk_count, 0);
    }

    #[test]
    fn test_stats_and_clear() {
        let (_dir, mut index) = open_temp();
        index
            .add_chunks(
                &[chunk("a.pdf", 0, "x"), chunk("b.pdf", 0, "y")],
                &[vec![1.0, 0.0], vec![0.0, 1.0]],
            )
            .unwrap();

        let stats = index.stats().unwrap();
        assert_eq!(stats.chunk_count, 2);
        assert_eq!(stats.document_count, 2);
        assert_eq!(stats.dimensions, 2);

        index.clear().unwrap();
        assert_eq!(index.stats().unwrap().chunk_count, 0);
    }

    #[test]
    fn test_load_chunks_orders_by_document_then_index() {
        let (_dir, mut index) = open_temp();
        index
            .add_chunks(
                &[
                    chunk("b.pdf", 0, "b0"),
                    chunk("a.pdf", 1, "a1"),
                    chunk("a.pdf", 0, "a0"),
                ],
                &[vec![1.0], vec![1.0], vec![1.0]],
            )
            .unwrap();

        let contents: Vec<String> = index
            .load_chunks()
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(contents, vec!["a0", "a1", "b0"]);
    }
}

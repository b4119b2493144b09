//! Document ingestion: PDF text extraction and chunking.

mod chunker;
mod pdf;

pub use chunker::{chunk_text, estimate_tokens};
pub use pdf::{extract_pdf_text, IngestError};

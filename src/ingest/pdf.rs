//! PDF text extraction backed by the `pdf-extract` crate.

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed for {path}: {message}")]
    Extraction { path: String, message: String },

    #[error("No extractable text in {0}")]
    EmptyDocument(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Extract the full text of a PDF file, pages concatenated in order.
///
/// `pdf-extract` returns the whole document as one string; scanned PDFs
/// without a text layer come back empty and are reported as such.
pub fn extract_pdf_text(path: &Path) -> Result<String> {
    let display = path.display().to_string();
    let data = std::fs::read(path)?;

    let text = pdf_extract::extract_text_from_mem(&data).map_err(|e| IngestError::Extraction {
        path: display.clone(),
        message: e.to_string(),
    })?;

    if text.trim().is_empty() {
        return Err(IngestError::EmptyDocument(display));
    }

    log::info!("extracted {} chars from {}", text.len(), display);
    Ok(text)
}

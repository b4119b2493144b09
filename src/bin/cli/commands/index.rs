use std::path::PathBuf;

use anyhow::{ensure, Result};

use crate::app::App;

pub fn run(app: &mut App, pdfs: &[PathBuf]) -> Result<()> {
    ensure!(!pdfs.is_empty(), "No PDF files given. Usage: study-buddy index <file.pdf>...");

    println!("Processing {} file(s)...", pdfs.len());
    let added = app.buddy.process_documents(pdfs)?;
    println!("Documents processed! {} chunks indexed.", added);
    Ok(())
}

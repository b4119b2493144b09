use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app.buddy.stats()?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Index:      {}", app.buddy.index_path().display());
    println!("Documents:  {}", stats.document_count);
    println!("Chunks:     {}", stats.chunk_count);
    println!("Dimensions: {}", stats.dimensions);
    Ok(())
}

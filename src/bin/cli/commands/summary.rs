use anyhow::Result;

use study_buddy::StudyError;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    if matches!(format, OutputFormat::Plain) {
        println!("Generating summary...");
    }

    match app.buddy.generate_summary() {
        Ok(summary) => {
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "summary": summary }))?)
                }
                OutputFormat::Plain => println!("\n{summary}"),
            }
            Ok(())
        }
        Err(StudyError::NoDocuments) => {
            println!("No documents indexed yet. Run `study-buddy index <file.pdf>` first.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

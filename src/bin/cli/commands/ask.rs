use anyhow::Result;

use study_buddy::chat::QaError;
use study_buddy::StudyError;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, question: &str, format: &OutputFormat) -> Result<()> {
    match app.buddy.ask(question) {
        Ok(answer) => {
            if let OutputFormat::Json = format {
                println!("{}", serde_json::to_string_pretty(&answer)?);
                return Ok(());
            }

            println!("{}", answer.content);

            let mut documents: Vec<&str> =
                answer.sources.iter().map(|s| s.document.as_str()).collect();
            documents.sort_unstable();
            documents.dedup();
            if !documents.is_empty() {
                println!("\nSources: {}", documents.join(", "));
            }
            Ok(())
        }
        Err(StudyError::InputFlagged) => {
            println!("Your input was flagged as inappropriate. Please try again.");
            Ok(())
        }
        Err(StudyError::Qa(QaError::NoDocuments)) => {
            println!("Please process the documents first: study-buddy index <file.pdf>");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

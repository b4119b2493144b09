use anyhow::Result;

use study_buddy::chat::{ChatHistory, ChatTurn, QaError};
use study_buddy::StudyError;

use crate::app::App;
use crate::commands::read_input;

pub fn run(app: &App) -> Result<()> {
    println!("Ask a question about your documents (empty line to quit).");

    let mut history = ChatHistory::new();
    loop {
        let Some(line) = read_input("> ")? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            break;
        }

        match app.buddy.ask(question) {
            Ok(answer) => {
                history.push(ChatTurn::user(question));
                println!("{}\n", answer.content);
                history.push(ChatTurn::assistant(answer.content));
            }
            Err(StudyError::InputFlagged) => {
                println!("Your input was flagged as inappropriate. Please try again.\n");
            }
            Err(StudyError::Qa(QaError::NoDocuments)) => {
                println!("Please process the documents first: study-buddy index <file.pdf>");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !history.is_empty() {
        log::info!("chat ended after {} messages", history.len());
    }
    Ok(())
}

use anyhow::Result;

use study_buddy::flashcards::FlashcardSession;
use study_buddy::StudyError;

use crate::app::App;
use crate::commands::read_input;

pub fn run(app: &App) -> Result<()> {
    println!("Generating flashcards...");
    let cards = match app.buddy.generate_flashcards() {
        Ok(cards) => cards,
        Err(StudyError::NoDocuments) => {
            println!("No documents indexed yet. Run `study-buddy index <file.pdf>` first.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if cards.is_empty() {
        println!("The model produced no usable flashcards. Try again.");
        return Ok(());
    }
    println!("Flashcards generated: {}\n", cards.len());

    let mut session = FlashcardSession::new(cards);
    loop {
        let Some(card) = session.current_card() else {
            return Ok(());
        };

        println!(
            "Flashcard {} of {}",
            session.current_index() + 1,
            session.total()
        );
        println!("Front: {}", card.front);
        if session.is_revealed() {
            println!("Back:  {}", card.back);
        }

        let Some(line) = read_input("\n[r]eveal, [n]ext, [p]revious, [q]uit: ")? else {
            return Ok(());
        };
        match line.trim() {
            "r" => session.reveal(),
            "n" => {
                if let Err(e) = session.next() {
                    println!("{e}");
                }
            }
            "p" => {
                if let Err(e) = session.previous() {
                    println!("{e}");
                }
            }
            "q" => return Ok(()),
            _ => {}
        }
        println!();
    }
}

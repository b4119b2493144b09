pub mod ask;
pub mod chat;
pub mod flashcards;
pub mod index;
pub mod quiz;
pub mod status;
pub mod summary;

use std::io::{self, BufRead, Write};

/// Print a prompt and read one line from stdin; `None` on EOF.
pub fn read_input(prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

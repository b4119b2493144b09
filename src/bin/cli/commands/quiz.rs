use anyhow::Result;

use study_buddy::quiz::QuizSession;
use study_buddy::StudyError;

use crate::app::App;
use crate::commands::read_input;

pub fn run(app: &App) -> Result<()> {
    println!("Generating quiz...");
    let questions = match app.buddy.generate_quiz() {
        Ok(questions) => questions,
        Err(StudyError::NoDocuments) => {
            println!("No documents indexed yet. Run `study-buddy index <file.pdf>` first.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if questions.is_empty() {
        println!("The model produced no usable questions. Try again.");
        return Ok(());
    }
    println!("{} quiz questions generated!\n", questions.len());

    let mut session = QuizSession::new(questions);
    run_session(&mut session)
}

fn run_session(session: &mut QuizSession) -> Result<()> {
    loop {
        if session.is_complete() {
            println!(
                "\nQuiz completed! Your final score: {} / {}",
                session.score(),
                session.total()
            );
            match read_input("Restart [r] or end the quiz [Enter]? ")? {
                Some(line) if line.trim().eq_ignore_ascii_case("r") => {
                    session.restart();
                    println!();
                    continue;
                }
                _ => return Ok(()),
            }
        }

        show_question(session);

        let Some(line) = read_input("\nYour answer (letter, q to quit): ")? else {
            return Ok(());
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let Some(label) = input.chars().next() else {
            continue;
        };

        if let Err(e) = session.select_answer(label) {
            println!("{e}");
            continue;
        }
        match session.submit() {
            Ok(outcome) if outcome.correct => {
                println!("Your answer is correct!");
                println!("Explanation: {}", outcome.explanation);
            }
            Ok(outcome) => {
                println!("Incorrect. The correct answer is {}.", outcome.correct_label);
                println!("Explanation: {}", outcome.explanation);
            }
            Err(e) => {
                println!("{e}");
                continue;
            }
        }

        if read_input("Press Enter for the next question...")?.is_none() {
            return Ok(());
        }
        session.advance()?;
        println!();
    }
}

fn show_question(session: &QuizSession) {
    let Some(question) = session.current_question() else {
        return;
    };

    println!(
        "Question {} of {}",
        session.current_index() + 1,
        session.total()
    );
    println!("{}\n", question.question);
    for option in question.selectable_options() {
        if let Some(label) = option.label {
            println!("  {}) {}", label, option.text);
        }
    }
}

//! Block-oriented parsing of quiz and flashcard text.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use super::models::{AnswerOption, Flashcard, QuestionKind, QuizQuestion};

/// Keys a question block must supply to be accepted.
const REQUIRED_KEYS: [&str; 5] = ["Question", "Type", "Options", "Correct Answer", "Explanation"];

/// Positional labels for multiple-choice options.
const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Split raw model output into blocks separated by blank lines.
/// Lines containing only whitespace count as separators.
fn split_blocks(text: &str) -> Vec<&str> {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator = SEPARATOR.get_or_init(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap());

    separator
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Parse quiz questions out of raw model output.
///
/// Blocks that do not supply every required key, carry an unknown
/// `Type`, or name a correct answer that is not among the selectable
/// options are dropped with a log diagnostic. Returns an empty vector
/// for empty or fully-malformed input, never an error.
pub fn parse_quiz_text(text: &str) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();

    for (block_no, block) in split_blocks(text).into_iter().enumerate() {
        match parse_quiz_block(block) {
            Some(question) => questions.push(question),
            None => log::debug!("dropping malformed question block {}", block_no + 1),
        }
    }

    questions
}

fn parse_quiz_block(block: &str) -> Option<QuizQuestion> {
    // Later occurrences of a key overwrite earlier ones.
    let mut fields: HashMap<&str, &str> = HashMap::new();
    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            log::debug!("ignoring line without a key/value separator: {:?}", line);
            continue;
        };
        fields.insert(key.trim(), value.trim());
    }

    if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !fields.contains_key(**key)) {
        log::debug!("question block is missing the {:?} key", missing);
        return None;
    }

    let kind_value = fields["Type"];
    let Some(kind) = QuestionKind::from_type_value(kind_value) else {
        log::debug!("unknown question type {:?}", kind_value);
        return None;
    };

    let options = match kind {
        QuestionKind::MultipleChoice => parse_options(fields["Options"]),
        // The prompt asks for "A) True, B) False" but the pair is fixed
        // regardless of what the model produced.
        QuestionKind::TrueFalse => vec![
            AnswerOption::new('A', "True"),
            AnswerOption::new('B', "False"),
        ],
    };
    if options.is_empty() {
        log::debug!("question block has no usable options");
        return None;
    }

    let correct_label = fields["Correct Answer"]
        .chars()
        .find(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())?;
    if !options.iter().any(|o| o.label == Some(correct_label)) {
        log::debug!(
            "correct answer {:?} is not among the option labels",
            correct_label
        );
        return None;
    }

    Some(QuizQuestion {
        question: fields["Question"].to_string(),
        kind,
        options,
        correct_label,
        explanation: fields["Explanation"].to_string(),
    })
}

/// Parse a comma-separated `LETTER) text` option list.
///
/// Labels are assigned positionally from `A..D`; tokens past the fourth
/// and tokens without a `)` separator are kept unlabeled.
fn parse_options(raw: &str) -> Vec<AnswerOption> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| match token.split_once(')') {
            Some((_, text)) if position < OPTION_LABELS.len() => {
                AnswerOption::new(OPTION_LABELS[position], text.trim())
            }
            Some((_, text)) => AnswerOption::unlabeled(text.trim()),
            None => AnswerOption::unlabeled(token),
        })
        .collect()
}

/// Parse flashcards out of raw model output.
///
/// A block is accepted when a `Front:` marker is followed by a `Back:`
/// marker and both sides are non-empty after trimming; everything else
/// is dropped with a log diagnostic. Never an error.
pub fn parse_flashcard_text(text: &str) -> Vec<Flashcard> {
    let mut cards = Vec::new();

    for (block_no, block) in split_blocks(text).into_iter().enumerate() {
        match parse_flashcard_block(block) {
            Some(card) => cards.push(card),
            None => log::debug!("dropping malformed flashcard block {}", block_no + 1),
        }
    }

    cards
}

fn parse_flashcard_block(block: &str) -> Option<Flashcard> {
    const FRONT: &str = "Front:";
    const BACK: &str = "Back:";

    let front_at = block.find(FRONT)?;
    let rest = &block[front_at + FRONT.len()..];
    let back_at = rest.find(BACK)?;

    let front = rest[..back_at].trim();
    let back = rest[back_at + BACK.len()..].trim();
    if front.is_empty() || back.is_empty() {
        return None;
    }

    Some(Flashcard::new(front, back))
}

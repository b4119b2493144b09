//! Data models for parsed model output.

use serde::{Deserialize, Serialize};

/// Kind of quiz question, taken from the block's `Type` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
}

impl QuestionKind {
    /// Parse the `Type` value of a question block.
    pub(crate) fn from_type_value(value: &str) -> Option<Self> {
        match value.trim() {
            "multiple_choice" => Some(Self::MultipleChoice),
            "true_false" => Some(Self::TrueFalse),
            _ => None,
        }
    }
}

/// One answer option of a quiz question.
///
/// `label` is `None` for option tokens that lacked a `)` separator.
/// Such options are retained for traceability but are not selectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub label: Option<char>,
    pub text: String,
}

impl AnswerOption {
    pub fn new(label: char, text: impl Into<String>) -> Self {
        Self {
            label: Some(label),
            text: text.into(),
        }
    }

    pub fn unlabeled(text: impl Into<String>) -> Self {
        Self {
            label: None,
            text: text.into(),
        }
    }
}

/// A quiz question parsed from model output.
///
/// Only fully-formed questions leave the parser: `question` and
/// `explanation` are set, `options` is non-empty and `correct_label`
/// matches one of the selectable options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub kind: QuestionKind,
    pub options: Vec<AnswerOption>,
    pub correct_label: char,
    pub explanation: String,
}

impl QuizQuestion {
    /// Options the user can actually pick (those that carry a label).
    pub fn selectable_options(&self) -> impl Iterator<Item = &AnswerOption> {
        self.options.iter().filter(|o| o.label.is_some())
    }

    /// Whether `label` names a selectable option of this question.
    pub fn has_label(&self, label: char) -> bool {
        self.options.iter().any(|o| o.label == Some(label))
    }
}

/// A flashcard with a prompt side and an answer side, both non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

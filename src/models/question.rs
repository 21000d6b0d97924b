use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a question is answered and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Two choices, one correct.
    #[serde(rename = "true-false")]
    TrueFalse,
    /// Any number of choices, one correct.
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    /// Any number of choices, a set of them jointly correct.
    #[serde(rename = "multiple-choice-v2")]
    MultipleAnswer,
}

impl QuestionKind {
    pub fn is_multi_answer(self) -> bool {
        matches!(self, Self::MultipleAnswer)
    }

    /// Short label shown next to the category.
    pub fn label(self) -> &'static str {
        match self {
            Self::TrueFalse => "true/false",
            Self::MultipleChoice => "multiple/choice",
            Self::MultipleAnswer => "multiple/answers",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The correct answer of a question: one index, or a set of indices.
///
/// Serialized as a bare number or an array of numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(usize),
    Multiple(Vec<usize>),
}

impl Answer {
    /// Whether `choice` is one of the correct indices.
    pub fn contains(&self, choice: usize) -> bool {
        match self {
            Self::Single(index) => *index == choice,
            Self::Multiple(indices) => indices.contains(&choice),
        }
    }

    fn indices(&self) -> &[usize] {
        match self {
            Self::Single(index) => std::slice::from_ref(index),
            Self::Multiple(indices) => indices,
        }
    }
}

/// A single quiz question as stored in a category file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    #[serde(rename = "question")]
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer: Answer,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Reasons a question record cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question {id} has no choices")]
    NoChoices { id: u64 },

    #[error("question {id}: answer index {index} is out of range for {choices} choices")]
    AnswerOutOfRange { id: u64, index: usize, choices: usize },

    #[error("question {id}: answer index {index} appears more than once")]
    DuplicateAnswer { id: u64, index: usize },

    #[error("question {id}: answer shape does not match type {kind}")]
    ShapeMismatch { id: u64, kind: QuestionKind },
}

impl Question {
    /// Checks that every answer index points at a choice, that a multi-answer
    /// set has no duplicates, and that the answer shape matches the type.
    pub fn validate(&self) -> Result<(), QuestionError> {
        let id = self.id;
        if self.choices.is_empty() {
            return Err(QuestionError::NoChoices { id });
        }

        let shape_ok = match (&self.answer, self.kind.is_multi_answer()) {
            (Answer::Multiple(_), true) | (Answer::Single(_), false) => true,
            _ => false,
        };
        if !shape_ok {
            return Err(QuestionError::ShapeMismatch { id, kind: self.kind });
        }

        let mut seen = BTreeSet::new();
        for &index in self.answer.indices() {
            if index >= self.choices.len() {
                return Err(QuestionError::AnswerOutOfRange {
                    id,
                    index,
                    choices: self.choices.len(),
                });
            }
            if !seen.insert(index) {
                return Err(QuestionError::DuplicateAnswer { id, index });
            }
        }

        Ok(())
    }

    pub fn is_multi_answer(&self) -> bool {
        self.kind.is_multi_answer()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn single(id: u64, choices: &[&str], answer: usize) -> Question {
        Question {
            id,
            prompt: format!("Question {id}"),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            answer: Answer::Single(answer),
            kind: QuestionKind::MultipleChoice,
            category: "general".to_string(),
            image: None,
        }
    }

    pub fn multi(id: u64, choices: &[&str], answer: &[usize]) -> Question {
        Question {
            id,
            prompt: format!("Question {id}"),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            answer: Answer::Multiple(answer.to_vec()),
            kind: QuestionKind::MultipleAnswer,
            category: "general".to_string(),
            image: None,
        }
    }
}

use thiserror::Error;

use crate::model::{AnswerKey, Question, QuestionKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("answer kind {got:?} does not match question kind {expected:?}")]
    KindMismatch {
        expected: QuestionKind,
        got: QuestionKind,
    },

    #[error("option {index} does not exist ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },
}

/// A player's submission for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Zero-based option index.
    Choice(usize),
    Boolean(bool),
}

impl Answer {
    #[must_use]
    pub fn kind(self) -> QuestionKind {
        match self {
            Answer::Choice(_) => QuestionKind::Choice,
            Answer::Boolean(_) => QuestionKind::Boolean,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Scores `answer` against `question` by exact match.
///
/// # Errors
///
/// Returns `ScoringError::KindMismatch` if the answer shape does not fit the
/// question, or `ScoringError::OptionOutOfRange` for an index past the last option.
pub fn evaluate(question: &Question, answer: Answer) -> Result<Verdict, ScoringError> {
    let matched = match (question.answer_key(), answer) {
        (AnswerKey::Choice { options, correct }, Answer::Choice(index)) => {
            if index >= options.len() {
                return Err(ScoringError::OptionOutOfRange {
                    index,
                    len: options.len(),
                });
            }
            index == *correct
        }
        (AnswerKey::Boolean(correct), Answer::Boolean(value)) => value == *correct,
        _ => {
            return Err(ScoringError::KindMismatch {
                expected: question.kind(),
                got: answer.kind(),
            });
        }
    };

    Ok(if matched {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    })
}

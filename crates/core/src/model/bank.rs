use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
}

/// The read-only set of questions a game draws its runs from.
///
/// Every question in a bank has already passed validation, so a bank that
/// exists is safe to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::Empty` with no questions, or `BankError::DuplicateId`
    /// when two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for q in &questions {
            if !seen.insert(q.id()) {
                return Err(BankError::DuplicateId(q.id()));
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: u32) -> Question {
        Question::boolean(QuestionId::new(id), format!("Q{id}"), true, None).unwrap()
    }

    #[test]
    fn empty_bank_is_rejected() {
        assert_eq!(QuestionBank::new(Vec::new()), Err(BankError::Empty));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = QuestionBank::new(vec![q(1), q(2), q(1)]).unwrap_err();
        assert_eq!(err, BankError::DuplicateId(QuestionId::new(1)));
    }

    #[test]
    fn keeps_source_order() {
        let bank = QuestionBank::new(vec![q(2), q(1)]).unwrap();
        assert_eq!(bank.len(), 2);
        let texts: Vec<&str> = bank.questions().iter().map(Question::text).collect();
        assert_eq!(texts, ["Q2", "Q1"]);
    }
}

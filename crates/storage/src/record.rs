use quiz_core::model::{ImageRef, Question, QuestionError, QuestionId};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("choice question is missing `choices`")]
    MissingChoices,

    #[error("true/false question must not carry `choices`")]
    UnexpectedChoices,

    #[error("answer must be an option index for choice questions and a bool for true/false")]
    AnswerShape,

    #[error(transparent)]
    Question(#[from] QuestionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Choice,
    #[serde(alias = "ox")]
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecordAnswer {
    Index(usize),
    Flag(bool),
}

/// On-disk shape of one question in a bank file.
///
/// ```json
/// { "question": "Capital of Korea?", "type": "choice",
///   "choices": ["Seoul", "Busan"], "answer": 0, "image": "img/seoul.png" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    pub answer: RecordAnswer,
    /// Blank strings mean "no image".
    #[serde(default)]
    pub image: Option<String>,
}

impl QuestionRecord {
    /// Validates the record into a domain `Question` carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the record's fields do not agree with its kind or
    /// the resulting question fails validation.
    pub fn into_question(self, id: QuestionId) -> Result<Question, RecordError> {
        let image = self
            .image
            .filter(|raw| !raw.trim().is_empty())
            .map(ImageRef::parse)
            .transpose()?;
        match (self.kind, self.choices, self.answer) {
            (RecordKind::Choice, Some(choices), RecordAnswer::Index(correct)) => {
                Ok(Question::choice(id, self.question, choices, correct, image)?)
            }
            (RecordKind::Choice, None, _) => Err(RecordError::MissingChoices),
            (RecordKind::Boolean, Some(_), _) => Err(RecordError::UnexpectedChoices),
            (RecordKind::Boolean, None, RecordAnswer::Flag(correct)) => {
                Ok(Question::boolean(id, self.question, correct, image)?)
            }
            _ => Err(RecordError::AnswerShape),
        }
    }
}

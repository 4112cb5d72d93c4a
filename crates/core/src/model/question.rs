use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("choice question has no options")]
    NoOptions,

    #[error("correct answer index {index} is out of range for {len} options")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error("image reference cannot be empty")]
    EmptyImage,

    #[error("invalid image url: {0}")]
    InvalidImageUrl(String),
}

//
// ─── IMAGE REFERENCE ───────────────────────────────────────────────────────────
//

/// Where a question's illustration lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Path(PathBuf),
    Url(Url),
}

impl ImageRef {
    /// Parses a raw reference. Anything with a scheme is treated as a URL,
    /// everything else as a path relative to the asset root.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyImage` for blank input and
    /// `QuestionError::InvalidImageUrl` when a scheme is present but the URL is malformed.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, QuestionError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(QuestionError::EmptyImage);
        }
        if raw.contains("://") {
            let url =
                Url::parse(raw).map_err(|_| QuestionError::InvalidImageUrl(raw.to_string()))?;
            return Ok(Self::Url(url));
        }
        Ok(Self::Path(PathBuf::from(raw)))
    }

    /// Value suitable for an `img` `src` attribute.
    #[must_use]
    pub fn to_src(&self) -> String {
        match self {
            ImageRef::Path(p) => p.display().to_string(),
            ImageRef::Url(u) => u.to_string(),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Choice,
    Boolean,
}

/// The expected answer, shaped by the question kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKey {
    Choice { options: Vec<String>, correct: usize },
    Boolean(bool),
}

/// An immutable question from the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    key: AnswerKey,
    image: Option<ImageRef>,
}

impl Question {
    /// Builds a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, `options` is empty, or
    /// `correct` does not index into `options`. Single and blank options are
    /// accepted as-is.
    pub fn choice(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct: usize,
        image: Option<ImageRef>,
    ) -> Result<Self, QuestionError> {
        let text = validate_text(text.into())?;
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if correct >= options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                index: correct,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            text,
            key: AnswerKey::Choice { options, correct },
            image,
        })
    }

    /// Builds a true/false question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the text is blank.
    pub fn boolean(
        id: QuestionId,
        text: impl Into<String>,
        correct: bool,
        image: Option<ImageRef>,
    ) -> Result<Self, QuestionError> {
        let text = validate_text(text.into())?;
        Ok(Self {
            id,
            text,
            key: AnswerKey::Boolean(correct),
            image,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self.key {
            AnswerKey::Choice { .. } => QuestionKind::Choice,
            AnswerKey::Boolean(_) => QuestionKind::Boolean,
        }
    }

    /// Options for a choice question; empty for true/false.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.key {
            AnswerKey::Choice { options, .. } => options,
            AnswerKey::Boolean(_) => &[],
        }
    }

    #[must_use]
    pub fn answer_key(&self) -> &AnswerKey {
        &self.key
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }
}

fn validate_text(text: String) -> Result<String, QuestionError> {
    if text.trim().is_empty() {
        return Err(QuestionError::EmptyText);
    }
    Ok(text)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

use quiz_core::SessionError;
use services::QuizServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidAnswer,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidAnswer => "That answer does not fit this question.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&QuizServiceError> for ViewError {
    fn from(err: &QuizServiceError) -> Self {
        match err {
            QuizServiceError::Session(SessionError::Scoring(_)) => Self::InvalidAnswer,
            _ => Self::Unknown,
        }
    }
}

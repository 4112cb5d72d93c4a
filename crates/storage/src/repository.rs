use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::Question;
use thiserror::Error;

use crate::record::RecordError;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question source not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("question {index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: RecordError,
    },
}

/// Read-only source of the question bank.
///
/// Implementations return fully validated questions; any malformed record fails
/// the whole load.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Load every question, in source order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or a record is invalid.
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// Fixed, in-process question list. Used by tests and embedded banks.
#[derive(Clone, Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<Vec<Question>>,
}

impl InMemoryQuestionRepository {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(questions),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(self.questions.as_ref().clone())
    }
}

/// Bundles the question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn json_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            questions: Arc::new(crate::json::JsonQuestionRepository::file(path)),
        }
    }
}

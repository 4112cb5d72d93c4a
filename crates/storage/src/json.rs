use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId};

use crate::record::QuestionRecord;
use crate::repository::{QuestionRepository, StorageError};

/// Question bank stored on disk as a JSON array of [`QuestionRecord`]s.
#[derive(Debug, Clone)]
pub struct JsonQuestionRepository {
    path: PathBuf,
}

impl JsonQuestionRepository {
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionRepository for JsonQuestionRepository {
    async fn load_questions(&self) -> Result<Vec<Question>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(self.path.display().to_string())
            } else {
                StorageError::Io(e.to_string())
            }
        })?;
        parse_questions(&raw)
    }
}

/// Parses and validates a JSON question array. Ids are the 1-based record positions.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON and
/// `StorageError::InvalidRecord` for the first record that fails validation.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, StorageError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = u32::try_from(index + 1)
                .map_err(|_| StorageError::Serialization("too many questions".into()))?;
            record
                .into_question(QuestionId::new(id))
                .map_err(|source| StorageError::InvalidRecord { index, source })
        })
        .collect()
}

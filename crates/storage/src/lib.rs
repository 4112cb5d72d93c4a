#![forbid(unsafe_code)]

pub mod json;
pub mod record;
pub mod repository;

pub use json::{JsonQuestionRepository, parse_questions};
pub use record::{QuestionRecord, RecordAnswer, RecordError, RecordKind};
pub use repository::{InMemoryQuestionRepository, QuestionRepository, Storage, StorageError};

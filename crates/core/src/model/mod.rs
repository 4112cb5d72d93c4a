mod bank;
mod ids;
mod question;
mod settings;

pub use bank::{BankError, QuestionBank};
pub use ids::QuestionId;
pub use question::{AnswerKey, ImageRef, Question, QuestionError, QuestionKind};
pub use settings::{QuizSettings, SettingsError};

#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::QuizServiceError;
pub use quiz::{QuizGame, QuizProgress, QuizService, ShuffleSource, feedback_delay};

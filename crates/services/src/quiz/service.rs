use std::sync::Arc;

use quiz_core::model::{QuestionBank, QuizSettings};
use storage::QuestionRepository;
use tracing::info;

use super::game::QuizGame;
use super::shuffle::ShuffleSource;
use crate::Clock;
use crate::error::QuizServiceError;

/// Holds the validated question bank and hands out games.
///
/// The bank is loaded once; every game shares it.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    shuffle: ShuffleSource,
    settings: QuizSettings,
    bank: Arc<QuestionBank>,
}

impl QuizService {
    /// Load and validate the bank from `questions`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if a record is malformed or the source
    /// is unreadable, and `QuizServiceError::Bank` if the bank is empty.
    pub async fn load(
        questions: &dyn QuestionRepository,
        settings: QuizSettings,
        clock: Clock,
    ) -> Result<Self, QuizServiceError> {
        let loaded = questions.load_questions().await?;
        let bank = QuestionBank::new(loaded)?;
        info!(
            questions = bank.len(),
            pool_size = ?settings.pool_size(),
            "question bank loaded"
        );
        Ok(Self::from_bank(Arc::new(bank), settings, clock))
    }

    #[must_use]
    pub fn from_bank(bank: Arc<QuestionBank>, settings: QuizSettings, clock: Clock) -> Self {
        Self {
            clock,
            shuffle: ShuffleSource::default(),
            settings,
            bank,
        }
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: ShuffleSource) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// A new, not-yet-started game.
    #[must_use]
    pub fn new_game(&self) -> QuizGame {
        QuizGame::new(
            Arc::clone(&self.bank),
            self.settings.clone(),
            self.clock,
            self.shuffle.rng(),
        )
    }
}

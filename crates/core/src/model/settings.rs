use std::time::Duration;

use thiserror::Error;

use crate::scoring::Verdict;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("pool size must be > 0")]
    InvalidPoolSize,

    #[error("feedback delays must be > 0")]
    ZeroDelay,

    #[error("incorrect-answer delay must not be shorter than the correct-answer delay")]
    DelayOrder,
}

/// Tunables for a quiz game.
///
/// `pool_size` caps how many questions a run draws from the bank (`None` plays
/// the whole bank). The two delays control how long feedback stays on screen
/// before the session advances or restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    pool_size: Option<u32>,
    correct_delay: Duration,
    incorrect_delay: Duration,
}

impl QuizSettings {
    pub const DEFAULT_CORRECT_DELAY: Duration = Duration::from_millis(1000);
    pub const DEFAULT_INCORRECT_DELAY: Duration = Duration::from_millis(1500);

    /// # Errors
    ///
    /// Returns `SettingsError` if `pool_size` is zero, either delay is zero, or the
    /// incorrect delay is shorter than the correct one.
    pub fn new(
        pool_size: Option<u32>,
        correct_delay: Duration,
        incorrect_delay: Duration,
    ) -> Result<Self, SettingsError> {
        if pool_size == Some(0) {
            return Err(SettingsError::InvalidPoolSize);
        }
        if correct_delay.is_zero() || incorrect_delay.is_zero() {
            return Err(SettingsError::ZeroDelay);
        }
        if incorrect_delay < correct_delay {
            return Err(SettingsError::DelayOrder);
        }
        Ok(Self {
            pool_size,
            correct_delay,
            incorrect_delay,
        })
    }

    /// Returns a copy with a different pool cap.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidPoolSize` for `Some(0)`.
    pub fn with_pool_size(self, pool_size: Option<u32>) -> Result<Self, SettingsError> {
        Self::new(pool_size, self.correct_delay, self.incorrect_delay)
    }

    #[must_use]
    pub fn pool_size(&self) -> Option<u32> {
        self.pool_size
    }

    #[must_use]
    pub fn correct_delay(&self) -> Duration {
        self.correct_delay
    }

    #[must_use]
    pub fn incorrect_delay(&self) -> Duration {
        self.incorrect_delay
    }

    /// How long feedback for `verdict` stays visible.
    #[must_use]
    pub fn delay_for(&self, verdict: Verdict) -> Duration {
        match verdict {
            Verdict::Correct => self.correct_delay,
            Verdict::Incorrect => self.incorrect_delay,
        }
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            pool_size: None,
            correct_delay: Self::DEFAULT_CORRECT_DELAY,
            incorrect_delay: Self::DEFAULT_INCORRECT_DELAY,
        }
    }
}

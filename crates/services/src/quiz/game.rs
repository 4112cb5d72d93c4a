use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{debug, info};

use quiz_core::model::{QuestionBank, QuizSettings};
use quiz_core::{Answer, FireOutcome, QuizSession, SessionPhase, SubmitOutcome, TransitionToken};

use super::progress::QuizProgress;
use super::timer::feedback_delay;
use crate::Clock;
use crate::error::QuizServiceError;

/// A playable game: the session state machine plus its clock and randomness.
pub struct QuizGame {
    session: QuizSession,
    clock: Clock,
    rng: StdRng,
}

impl QuizGame {
    pub(crate) fn new(
        bank: Arc<QuestionBank>,
        settings: QuizSettings,
        clock: Clock,
        rng: StdRng,
    ) -> Self {
        Self {
            session: QuizSession::new(bank, settings),
            clock,
            rng,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Number of questions in the bank this game draws from.
    #[must_use]
    pub fn bank_size(&self) -> usize {
        self.session.bank().len()
    }

    /// Lets tests move a fixed clock between transitions.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.session.pool().len();
        QuizProgress {
            question_number: (self.session.position() + 1).min(total),
            total,
            attempt: self.session.attempt(),
            is_complete: self.phase() == SessionPhase::Completed,
        }
    }

    /// Start (or start over) with a freshly drawn pool.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if no pool can be drawn.
    pub fn start(&mut self) -> Result<(), QuizServiceError> {
        let now = self.clock.now();
        self.session.start(&mut self.rng, now)?;
        info!(
            pool = self.session.pool().len(),
            generation = self.session.generation(),
            "run started"
        );
        Ok(())
    }

    /// Submit an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` outside a run or for an ill-shaped answer.
    pub fn submit(&mut self, answer: Answer) -> Result<SubmitOutcome, QuizServiceError> {
        let question_id = self.session.current_question().map(|q| q.id());
        let outcome = self.session.submit(answer)?;
        match outcome {
            SubmitOutcome::Scheduled { verdict, pending } => debug!(
                question = ?question_id,
                ?verdict,
                delay = ?pending.delay,
                "answer evaluated"
            ),
            SubmitOutcome::Ignored => debug!("answer ignored while feedback is showing"),
        }
        Ok(outcome)
    }

    /// Apply the transition identified by `token`, if it is still current.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if a restart cannot draw a pool.
    pub fn fire(&mut self, token: TransitionToken) -> Result<FireOutcome, QuizServiceError> {
        let now = self.clock.now();
        let outcome = self.session.fire(token, &mut self.rng, now)?;
        match outcome {
            FireOutcome::Advanced { position } => debug!(position, "advanced"),
            FireOutcome::Completed { .. } => info!(
                elapsed = ?self.session.elapsed().map(|e| e.to_string()),
                attempt = self.session.attempt(),
                "run completed"
            ),
            FireOutcome::Restarted { attempt } => info!(attempt, "wrong answer, run restarted"),
            FireOutcome::Stale => debug!(
                generation = token.generation(),
                sequence = token.sequence(),
                "stale transition ignored"
            ),
        }
        Ok(outcome)
    }

    /// Wait out the pending feedback delay, then fire it.
    ///
    /// Returns `None` when nothing is pending.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`QuizGame::fire`].
    pub async fn settle(&mut self) -> Result<Option<FireOutcome>, QuizServiceError> {
        let Some(pending) = self.session.pending() else {
            return Ok(None);
        };
        let token = feedback_delay(pending).await;
        self.fire(token).map(Some)
    }
}

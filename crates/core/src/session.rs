use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

use crate::elapsed::{ElapsedTime, elapsed_between};
use crate::model::{Question, QuestionBank, QuizSettings};
use crate::pool::draw_pool;
use crate::scoring::{Answer, ScoringError, Verdict, evaluate};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for a run")]
    Empty,

    #[error("run has not been started")]
    NotStarted,

    #[error("run already completed")]
    Completed,

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

//
// ─── TRANSITIONS ───────────────────────────────────────────────────────────────
//

/// Identifies one scheduled transition.
///
/// `generation` changes on every reset of the run, `sequence` on every scheduled
/// transition, so a token can match at most one pending transition ever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionToken {
    generation: u64,
    sequence: u64,
}

impl TransitionToken {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Move to the next question (after a correct answer).
    Advance,
    /// Throw the run away and draw a new one (after a wrong answer).
    Restart,
}

/// A deferred transition waiting for its feedback delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub token: TransitionToken,
    pub kind: TransitionKind,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Answering,
    Locked,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The answer was scored and a transition now waits for `fire`.
    Scheduled {
        verdict: Verdict,
        pending: PendingTransition,
    },
    /// The session was locked; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Advanced { position: usize },
    Completed { finished_at: DateTime<Utc> },
    Restarted { attempt: u32 },
    /// The token no longer matches the pending transition.
    Stale,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One game of the quiz: the current run's pool, position, feedback lock and timing.
///
/// All mutation goes through `start`, `submit` and `fire`. Answering locks the
/// session behind a [`PendingTransition`]; the caller waits `delay` and hands the
/// token back to `fire`. Restarting bumps the generation, so tokens from an older
/// run are rejected as stale.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    settings: QuizSettings,
    pool: Vec<Question>,
    position: usize,
    feedback: Option<Verdict>,
    pending: Option<PendingTransition>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    generation: u64,
    sequence: u64,
    attempt: u32,
}

impl QuizSession {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, settings: QuizSettings) -> Self {
        Self {
            bank,
            settings,
            pool: Vec::new(),
            position: 0,
            feedback: None,
            pending: None,
            started_at: None,
            finished_at: None,
            generation: 0,
            sequence: 0,
            attempt: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.started_at.is_none() {
            SessionPhase::NotStarted
        } else if self.finished_at.is_some() {
            SessionPhase::Completed
        } else if self.pending.is_some() {
            SessionPhase::Locked
        } else {
            SessionPhase::Answering
        }
    }

    /// Begins a fresh game from any phase.
    ///
    /// Draws a new pool, resets position and timing and invalidates any pending
    /// transition. The attempt counter restarts at 1.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the draw yields no questions; the session
    /// is left untouched in that case.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        self.reset(rng, now)?;
        self.attempt = 1;
        Ok(())
    }

    /// Scores `answer` against the current question and locks the session.
    ///
    /// While locked, submissions are ignored without touching any state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` / `SessionError::Completed` outside a
    /// run, and `SessionError::Scoring` if the answer does not fit the question.
    pub fn submit(&mut self, answer: Answer) -> Result<SubmitOutcome, SessionError> {
        match self.phase() {
            SessionPhase::NotStarted => return Err(SessionError::NotStarted),
            SessionPhase::Completed => return Err(SessionError::Completed),
            SessionPhase::Locked => return Ok(SubmitOutcome::Ignored),
            SessionPhase::Answering => {}
        }

        let question = self.pool.get(self.position).ok_or(SessionError::Completed)?;
        let verdict = evaluate(question, answer)?;

        self.sequence += 1;
        let pending = PendingTransition {
            token: TransitionToken {
                generation: self.generation,
                sequence: self.sequence,
            },
            kind: match verdict {
                Verdict::Correct => TransitionKind::Advance,
                Verdict::Incorrect => TransitionKind::Restart,
            },
            delay: self.settings.delay_for(verdict),
        };
        self.feedback = Some(verdict);
        self.pending = Some(pending);

        Ok(SubmitOutcome::Scheduled { verdict, pending })
    }

    /// Applies the pending transition identified by `token`.
    ///
    /// A token that does not match the pending transition is a no-op and yields
    /// `FireOutcome::Stale`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if a restart cannot draw a new pool; the
    /// session stays locked so the transition can be fired again.
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        token: TransitionToken,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<FireOutcome, SessionError> {
        let Some(pending) = self.pending.filter(|p| p.token == token) else {
            return Ok(FireOutcome::Stale);
        };

        match pending.kind {
            TransitionKind::Advance => {
                self.pending = None;
                self.feedback = None;
                self.position = (self.position + 1).min(self.pool.len());
                if self.position == self.pool.len() {
                    let finished_at = self.mark_finished(now);
                    Ok(FireOutcome::Completed { finished_at })
                } else {
                    Ok(FireOutcome::Advanced {
                        position: self.position,
                    })
                }
            }
            TransitionKind::Restart => {
                self.reset(rng, now)?;
                self.attempt = self.attempt.saturating_add(1);
                Ok(FireOutcome::Restarted {
                    attempt: self.attempt,
                })
            }
        }
    }

    fn reset<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let pool = draw_pool(self.bank.questions(), self.settings.pool_size(), rng);
        if pool.is_empty() {
            return Err(SessionError::Empty);
        }

        self.pool = pool;
        self.generation += 1;
        self.position = 0;
        self.feedback = None;
        self.pending = None;
        self.started_at = Some(now);
        self.finished_at = None;
        Ok(())
    }

    // Only the first completion stamps the run.
    fn mark_finished(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let started_at = self.started_at.unwrap_or(now);
        *self.finished_at.get_or_insert(now.max(started_at))
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn pool(&self) -> &[Question] {
        &self.pool
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase() == SessionPhase::NotStarted {
            return None;
        }
        self.pool.get(self.position)
    }

    #[must_use]
    pub fn feedback(&self) -> Option<Verdict> {
        self.feedback
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 1-based count of runs in this game; 0 before the first start.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<ElapsedTime> {
        elapsed_between(self.started_at, self.finished_at)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

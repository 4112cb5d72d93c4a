#![forbid(unsafe_code)]

pub mod elapsed;
pub mod model;
pub mod pool;
pub mod scoring;
pub mod session;
pub mod time;

pub use elapsed::{ElapsedTime, elapsed_between};
pub use scoring::{Answer, ScoringError, Verdict, evaluate};
pub use session::{
    FireOutcome, PendingTransition, QuizSession, SessionError, SessionPhase, SubmitOutcome,
    TransitionKind, TransitionToken,
};
pub use time::Clock;

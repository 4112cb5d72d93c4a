mod game;
mod progress;
mod service;
mod shuffle;
mod timer;

// Public API of the quiz subsystem.
pub use game::QuizGame;
pub use progress::QuizProgress;
pub use service::QuizService;
pub use shuffle::ShuffleSource;
pub use timer::feedback_delay;

mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{
    AnswerButtons, CompletionVm, QuestionCardVm, QuizIntent, QuizScreen, QuizVm, StartVm,
    feedback_message,
};
pub use time_fmt::format_elapsed;

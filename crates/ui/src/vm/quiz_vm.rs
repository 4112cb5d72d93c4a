use quiz_core::model::{AnswerKey, ImageRef};
use quiz_core::{
    Answer, FireOutcome, PendingTransition, SessionPhase, SubmitOutcome, TransitionToken, Verdict,
};
use services::{QuizGame, QuizServiceError};

use super::time_fmt::format_elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Answer(Answer),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerButtons {
    Choice(Vec<String>),
    TrueFalse,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub number: usize,
    pub total: usize,
    pub attempt: u32,
    pub text: String,
    pub image_src: Option<String>,
    pub buttons: AnswerButtons,
    pub feedback: Option<Verdict>,
    pub locked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartVm {
    pub bank_size: usize,
    pub run_size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    /// `None` until the run has a finish time.
    pub elapsed: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Start(StartVm),
    Question(QuestionCardVm),
    Complete(CompletionVm),
}

#[must_use]
pub fn feedback_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Correct => "Correct!",
        Verdict::Incorrect => "Wrong! Starting over from the beginning.",
    }
}

pub struct QuizVm {
    game: QuizGame,
}

impl QuizVm {
    #[must_use]
    pub fn new(game: QuizGame) -> Self {
        Self { game }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.game.phase()
    }

    /// Apply a user intent. Returns the transition the caller must schedule, if any.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` when the game rejects the intent.
    pub fn apply(
        &mut self,
        intent: QuizIntent,
    ) -> Result<Option<PendingTransition>, QuizServiceError> {
        match intent {
            QuizIntent::Start => {
                self.game.start()?;
                Ok(None)
            }
            QuizIntent::Answer(answer) => match self.game.submit(answer)? {
                SubmitOutcome::Scheduled { pending, .. } => Ok(Some(pending)),
                SubmitOutcome::Ignored => Ok(None),
            },
        }
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError` if a restart cannot draw a new pool.
    pub fn fire(&mut self, token: TransitionToken) -> Result<FireOutcome, QuizServiceError> {
        self.game.fire(token)
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        let session = self.game.session();
        match session.phase() {
            SessionPhase::NotStarted => {
                let bank_size = self.game.bank_size();
                let run_size = session
                    .settings()
                    .pool_size()
                    .map_or(bank_size, |cap| bank_size.min(cap as usize));
                QuizScreen::Start(StartVm {
                    bank_size,
                    run_size,
                })
            }
            SessionPhase::Completed => QuizScreen::Complete(CompletionVm {
                elapsed: format_elapsed(session.elapsed()),
            }),
            SessionPhase::Answering | SessionPhase::Locked => {
                let progress = self.game.progress();
                let Some(question) = session.current_question() else {
                    return QuizScreen::Complete(CompletionVm {
                        elapsed: format_elapsed(session.elapsed()),
                    });
                };
                let buttons = match question.answer_key() {
                    AnswerKey::Choice { options, .. } => AnswerButtons::Choice(options.clone()),
                    AnswerKey::Boolean(_) => AnswerButtons::TrueFalse,
                };
                QuizScreen::Question(QuestionCardVm {
                    number: progress.question_number,
                    total: progress.total,
                    attempt: progress.attempt,
                    text: question.text().to_owned(),
                    image_src: question.image().map(ImageRef::to_src),
                    buttons,
                    feedback: session.feedback(),
                    locked: session.is_locked(),
                })
            }
        }
    }
}

use dioxus::prelude::*;
use dioxus::core::Task;
use quiz_core::{Answer, Verdict};
use services::feedback_delay;
use tracing::{debug, warn};

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{
    AnswerButtons, CompletionVm, QuestionCardVm, QuizIntent, QuizScreen, QuizVm, StartVm,
    feedback_message,
};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_signal(move || QuizVm::new(ctx.quiz_service().new_game()));
    let error = use_signal(|| None::<ViewError>);
    // At most one feedback timer is alive; starting over cancels it.
    let feedback_timer = use_signal(|| None::<Task>);

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut error = error;
        let mut feedback_timer = feedback_timer;

        let result = vm.write().apply(intent);
        match result {
            Ok(pending) => {
                error.set(None);
                if intent == QuizIntent::Start || pending.is_some() {
                    if let Some(task) = feedback_timer.write().take() {
                        task.cancel();
                        debug!("feedback timer cancelled");
                    }
                }
                let Some(pending) = pending else {
                    return;
                };
                let task = spawn(async move {
                    let token = feedback_delay(pending).await;
                    feedback_timer.set(None);
                    let fired = vm.write().fire(token);
                    if let Err(err) = fired {
                        warn!(error = %err, "feedback transition failed");
                        error.set(Some(ViewError::from(&err)));
                    }
                });
                feedback_timer.set(Some(task));
            }
            Err(err) => {
                warn!(error = %err, ?intent, "quiz intent rejected");
                error.set(Some(ViewError::from(&err)));
            }
        }
    });

    #[cfg(test)]
    use_hook(|| {
        if let Some(handles) = try_consume_context::<QuizTestHandles>() {
            handles.register(dispatch);
        }
    });

    let screen = vm.read().screen();
    let error_message = (*error.read()).map(ViewError::message);

    rsx! {
        div { class: "page quiz-page",
            h1 { class: "quiz-title", "🌍 Quiz Board Game" }
            if let Some(message) = error_message {
                p { class: "quiz-error", role: "alert", "{message}" }
            }
            match screen {
                QuizScreen::Start(start) => rsx! {
                    StartCard {
                        start,
                        on_start: move |()| dispatch.call(QuizIntent::Start),
                    }
                },
                QuizScreen::Question(card) => rsx! {
                    QuestionCard {
                        card,
                        on_answer: move |answer: Answer| dispatch.call(QuizIntent::Answer(answer)),
                    }
                },
                QuizScreen::Complete(completion) => rsx! {
                    CompletionCard {
                        completion,
                        on_restart: move |()| dispatch.call(QuizIntent::Start),
                    }
                },
            }
        }
    }
}

#[component]
fn StartCard(start: StartVm, on_start: EventHandler<()>) -> Element {
    let summary = format!(
        "{} of {} questions per run. One wrong answer sends you back to the first question.",
        start.run_size, start.bank_size
    );
    rsx! {
        section { class: "quiz-card quiz-start",
            p { class: "quiz-summary", "{summary}" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "Start"
            }
        }
    }
}

#[component]
fn QuestionCard(card: QuestionCardVm, on_answer: EventHandler<Answer>) -> Element {
    let locked = card.locked;
    let show_cross = card.feedback == Some(Verdict::Incorrect);
    let progress = format!("{} / {}", card.number, card.total);
    let prompt = format!("Question {}: {}", card.number, card.text);
    let attempt = (card.attempt > 1).then(|| format!("Attempt {}", card.attempt));
    let feedback = card.feedback.map(|verdict| {
        let class = if verdict.is_correct() {
            "quiz-feedback quiz-feedback--correct"
        } else {
            "quiz-feedback quiz-feedback--wrong"
        };
        (class, feedback_message(verdict))
    });
    let choices: Vec<(usize, String)> = match &card.buttons {
        AnswerButtons::Choice(options) => options
            .iter()
            .enumerate()
            .map(|(idx, option)| (idx, format!("{}. {option}", idx + 1)))
            .collect(),
        AnswerButtons::TrueFalse => Vec::new(),
    };
    let is_boolean = card.buttons == AnswerButtons::TrueFalse;

    rsx! {
        section { class: "quiz-card",
            if show_cross {
                div { class: "quiz-cross", aria_hidden: "true", "✕" }
            }
            div { class: "quiz-meta",
                span { class: "quiz-progress", "{progress}" }
                if let Some(attempt) = attempt {
                    span { class: "quiz-attempt", "{attempt}" }
                }
            }
            h2 { class: "quiz-prompt", "{prompt}" }
            if let Some(src) = card.image_src.clone() {
                img { class: "quiz-image", src: "{src}", alt: "Question illustration" }
            }
            if is_boolean {
                div { class: "quiz-answers quiz-answers--ox",
                    button {
                        class: "btn quiz-ox quiz-ox--o",
                        r#type: "button",
                        disabled: locked,
                        onclick: move |_| on_answer.call(Answer::Boolean(true)),
                        "O"
                    }
                    button {
                        class: "btn quiz-ox quiz-ox--x",
                        r#type: "button",
                        disabled: locked,
                        onclick: move |_| on_answer.call(Answer::Boolean(false)),
                        "X"
                    }
                }
            } else {
                div { class: "quiz-answers",
                    for (idx, label) in choices {
                        button {
                            key: "{idx}",
                            class: "btn quiz-option",
                            r#type: "button",
                            disabled: locked,
                            onclick: move |_| on_answer.call(Answer::Choice(idx)),
                            "{label}"
                        }
                    }
                }
            }
            if let Some((class, message)) = feedback {
                p { class: "{class}", role: "status", "{message}" }
            }
        }
    }
}

#[component]
fn CompletionCard(completion: CompletionVm, on_restart: EventHandler<()>) -> Element {
    rsx! {
        section { class: "quiz-card quiz-complete",
            h2 { "🎉 Completed!" }
            p { "Every question answered correctly." }
            if let Some(elapsed) = completion.elapsed.clone() {
                p { class: "quiz-elapsed", "⏱ Time taken: {elapsed}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Play again"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}

use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{Question, QuestionBank, QuestionId, QuizSettings};
use quiz_core::time::fixed_now;
use services::{Clock, QuizService, ShuffleSource};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;
use crate::vm::QuizIntent;

struct TestApp {
    quiz_service: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarnessRoot(props: QuizHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct QuizHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl QuizHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive the dom until the rendered html contains `needle`.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..20 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Three true/false statements that are all true, so `Answer::Boolean(true)`
/// is always right whatever order the pool is drawn in.
pub fn all_true_bank() -> QuestionBank {
    let statements = [
        "The Nile flows north",
        "Mercury is the closest planet to the Sun",
        "Owls can rotate their heads",
    ];
    let questions = statements
        .into_iter()
        .zip(1..)
        .map(|(text, id)| {
            Question::boolean(QuestionId::new(id), text, true, None).expect("question")
        })
        .collect();
    QuestionBank::new(questions).expect("bank")
}

pub fn fast_settings() -> QuizSettings {
    QuizSettings::new(None, Duration::from_millis(5), Duration::from_millis(10)).expect("settings")
}

pub fn setup_quiz_harness(settings: QuizSettings) -> QuizHarness {
    let clock = Clock::fixed(fixed_now());
    let service = QuizService::from_bank(Arc::new(all_true_bank()), settings, clock)
        .with_shuffle(ShuffleSource::Seeded(3));
    let app = Arc::new(TestApp {
        quiz_service: Arc::new(service),
    });
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarnessRoot,
        QuizHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    QuizHarness { dom, handles }
}

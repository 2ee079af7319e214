use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{IdentitySequencer, QuizService};
use storage::parse_questions;

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;

pub const QUIZ_TABLE: &str = "\
type,frage,solution,a,b,c,d,e,f,info
MC,Welche Schicht routet Pakete?,b,Sicherung,Vermittlung,Transport,,,,
FT,Wie heißt die Adresse auf Schicht 2?,a;b,MAC-Adresse,Hardware-Adresse,,,,,
";

struct TestApp {
    quiz: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn title(&self) -> String {
        "Rechnernetze-Quiz".to_string()
    }

    fn footer(&self) -> String {
        "© 2025 Albinot Hajrizaj".to_string()
    }

    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
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
fn QuizHarness(props: QuizHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz: Arc<QuizService>,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Run `f` inside the dom's runtime, then flush the resulting renders.
    pub fn interact(&mut self, f: impl FnOnce(&QuizTestHandles)) {
        let handles = self.handles.clone();
        self.dom.in_runtime(|| f(&handles));
        drive_dom(&mut self.dom);
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

/// Harness over `table`, asking questions in file order.
pub fn setup_quiz_harness(table: &str) -> ViewHarness {
    let bank = parse_questions(table.as_bytes()).expect("parse quiz table");
    let quiz = Arc::new(QuizService::new(Arc::new(bank), Box::new(IdentitySequencer)));
    let handles = QuizTestHandles::default();
    let app = Arc::new(TestApp {
        quiz: Arc::clone(&quiz),
    });

    let dom = VirtualDom::new_with_props(
        QuizHarness,
        QuizHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, quiz, handles }
}

use std::collections::BTreeSet;

use dioxus::prelude::*;
use quiz_core::AnswerInput;
use quiz_core::model::OptionKey;
use services::{QuizIntent, QuizPhase, QuizSnapshot};
use tracing::debug;

use crate::context::AppContext;
use crate::vm::map_quiz_snapshot;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Intent a key press in the free-text field stands for.
fn enter_intent(phase: QuizPhase) -> Option<QuizIntent> {
    match phase {
        QuizPhase::Answering => Some(QuizIntent::Check),
        QuizPhase::Revealed => Some(QuizIntent::Next),
        QuizPhase::Finished => None,
    }
}

fn toggle(selection: &mut BTreeSet<OptionKey>, key: OptionKey) {
    if !selection.remove(&key) {
        selection.insert(key);
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let title = ctx.title().to_string();
    let footer = ctx.footer().to_string();
    let quiz = ctx.quiz();

    let snapshot = {
        let quiz = quiz.clone();
        use_signal(move || quiz.snapshot())
    };
    // Inputs are owned by these signals; the service echoes them back on every intent.
    let mut selection = use_signal(|| snapshot.peek().selection.clone());
    let mut text = use_signal(|| snapshot.peek().text.clone());

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut snapshot = snapshot;
        let input = AnswerInput {
            selection: selection(),
            text: text(),
        };
        debug!(?intent, "quiz intent");
        let next: QuizSnapshot = quiz.dispatch(intent, &input);
        selection.set(next.selection.clone());
        text.set(next.text.clone());
        snapshot.set(next);
    });

    let submit = use_callback(move |()| {
        let phase = snapshot.peek().phase;
        if let Some(intent) = enter_intent(phase) {
            dispatch.call(intent);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, submit, selection, text);
            }
        }
    }

    let on_text_key = move |evt: KeyboardEvent| {
        if evt.data.key() == Key::Enter {
            evt.prevent_default();
            submit.call(());
        }
    };

    let vm = map_quiz_snapshot(&snapshot.read());
    let visibility = vm.visibility;

    rsx! {
        div { class: "page quiz-page",
            h2 { class: "quiz-title", "{title}" }

            div { class: "quiz-progress", title: "{vm.progress_label}",
                div { class: "quiz-progress__bar", style: "{vm.progress_style}" }
            }

            if !vm.heading.is_empty() {
                p { class: "quiz-position", "{vm.heading}" }
            }
            div { class: "quiz-prompt", id: "quiz-prompt", "{vm.prompt}" }

            if visibility.checklist {
                ul { class: "quiz-options",
                    for row in vm.options.iter().cloned() {
                        li { key: "{row.dom_id}", class: "{row.class}",
                            input {
                                r#type: "checkbox",
                                id: "{row.dom_id}",
                                checked: selection.read().contains(&row.key),
                                disabled: row.disabled,
                                onchange: move |_| {
                                    toggle(&mut selection.write(), row.key);
                                },
                            }
                            label { r#for: "{row.dom_id}", "{row.label}" }
                        }
                    }
                }
            }

            if visibility.text_input {
                input {
                    class: "quiz-text",
                    id: "quiz-text",
                    r#type: "text",
                    placeholder: "Antwort eingeben...",
                    value: "{text}",
                    readonly: vm.text_readonly,
                    oninput: move |evt: FormEvent| text.set(evt.value()),
                    onkeydown: on_text_key,
                }
            }

            div { class: "{vm.feedback_class}", id: "quiz-feedback", "{vm.feedback}" }

            div { class: "quiz-actions",
                if visibility.check {
                    button {
                        class: "btn btn--primary",
                        id: "quiz-check",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::Check),
                        "Auflösen"
                    }
                }
                if visibility.next {
                    button {
                        class: "btn btn--secondary",
                        id: "quiz-next",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::Next),
                        "Nächste Frage"
                    }
                }
                button {
                    class: "btn btn--danger",
                    id: "quiz-restart",
                    r#type: "button",
                    onclick: move |_| dispatch.call(QuizIntent::Restart),
                    "Quiz erneut starten"
                }
                if visibility.repeat_mistakes {
                    button {
                        class: "btn btn--warning",
                        id: "quiz-repeat",
                        r#type: "button",
                        onclick: move |_| dispatch.call(QuizIntent::RepeatMistakes),
                        "Falsche Fragen erneut lernen"
                    }
                }
            }

            p { class: "quiz-statistics", id: "quiz-statistics", "{vm.statistics}" }

            footer { class: "quiz-footer", "{footer}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    submit: Rc<RefCell<Option<Callback<()>>>>,
    selection: Rc<RefCell<Option<Signal<BTreeSet<OptionKey>>>>>,
    text: Rc<RefCell<Option<Signal<String>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        submit: Callback<()>,
        selection: Signal<BTreeSet<OptionKey>>,
        text: Signal<String>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.submit.borrow_mut() = Some(submit);
        *self.selection.borrow_mut() = Some(selection);
        *self.text.borrow_mut() = Some(text);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    /// Enter in the answer field.
    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("quiz submit registered")
    }

    pub(crate) fn selection(&self) -> Signal<BTreeSet<OptionKey>> {
        (*self.selection.borrow()).expect("quiz selection registered")
    }

    pub(crate) fn text(&self) -> Signal<String> {
        (*self.text.borrow()).expect("quiz text registered")
    }
}

use dioxus::prelude::WritableExt;
use quiz_core::AnswerInput;
use quiz_core::model::OptionKey;
use services::{QuizIntent, QuizPhase};

use super::test_harness::{QUIZ_TABLE, setup_quiz_harness};

const HEADER_ONLY: &str = "type,frage,solution,a,b,c,d,e,f,info\n";

#[test]
fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_quiz_harness(QUIZ_TABLE);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Rechnernetze-Quiz"), "missing title in {html}");
    assert!(html.contains("Welche Schicht routet Pakete?"), "missing prompt in {html}");
    assert!(html.contains("Frage 1 von 2"), "missing position in {html}");
    assert!(html.contains("Vermittlung"), "missing option in {html}");
    assert!(html.contains("quiz-option-a"), "missing option id in {html}");
    assert!(html.contains("Auflösen"), "missing check button in {html}");
    assert!(!html.contains("Nächste Frage"), "next shown before reveal in {html}");
    assert!(!html.contains("quiz-text"), "text input shown for MC in {html}");
    assert!(
        html.contains("Aktueller Punktestand: 0 / 2."),
        "missing statistics in {html}"
    );
    assert!(html.contains("© 2025 Albinot Hajrizaj"), "missing footer in {html}");
    assert!(!html.contains("checked"), "option checked before input in {html}");
}

#[test]
fn quiz_view_smoke_renders_revealed_free_text() {
    let mut harness = setup_quiz_harness(QUIZ_TABLE);
    harness.quiz.dispatch(QuizIntent::Check, &AnswerInput::default());
    harness.quiz.dispatch(QuizIntent::Next, &AnswerInput::default());
    harness
        .quiz
        .dispatch(QuizIntent::Check, &AnswerInput::text("ip-adresse"));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("quiz-text"), "missing text input in {html}");
    assert!(
        html.contains("Falsch! Richtige Antworten: MAC-Adresse, Hardware-Adresse"),
        "missing feedback in {html}"
    );
    assert!(html.contains("quiz-feedback--wrong"), "missing wrong tone in {html}");
    assert!(html.contains("Nächste Frage"), "missing next button in {html}");
    assert!(!html.contains("Auflösen"), "check shown after reveal in {html}");
    assert!(html.contains("ip-adresse"), "answer not kept in {html}");
    assert!(html.contains("readonly"), "answer field editable after reveal in {html}");
    assert!(!html.contains("disabled"), "answer field disabled after reveal in {html}");
}

#[test]
fn quiz_view_smoke_renders_finished_with_replay() {
    let mut harness = setup_quiz_harness(QUIZ_TABLE);
    for _ in 0..2 {
        harness.quiz.dispatch(QuizIntent::Check, &AnswerInput::default());
        harness.quiz.dispatch(QuizIntent::Next, &AnswerInput::default());
    }
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Quiz beendet!"), "missing finished prompt in {html}");
    assert!(
        html.contains("Endergebnis: 0 von 2 korrekt!"),
        "missing final result in {html}"
    );
    assert!(
        html.contains("Falsche Fragen erneut lernen"),
        "missing replay button in {html}"
    );
    assert!(html.contains("width: 100%;"), "progress not full in {html}");
    assert!(!html.contains("quiz-option-a"), "options shown when finished in {html}");
}

#[test]
fn quiz_view_smoke_renders_empty_bank() {
    let mut harness = setup_quiz_harness(HEADER_ONLY);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Keine Fragen vorhanden."), "missing placeholder in {html}");
    assert!(!html.contains("Auflösen"), "check shown without questions in {html}");
    assert!(
        !html.contains("Falsche Fragen erneut lernen"),
        "replay shown without mistakes in {html}"
    );
}

#[test]
fn quiz_view_dispatch_checks_current_selection() {
    let mut harness = setup_quiz_harness(QUIZ_TABLE);
    harness.rebuild();

    harness.interact(|handles| {
        handles.selection().set([OptionKey::B].into_iter().collect());
        handles.dispatch().call(QuizIntent::Check);
    });
    let html = harness.render();
    assert!(html.contains("Richtig (MC)!"), "missing feedback in {html}");
    assert!(html.contains("quiz-option--solution"), "missing highlight in {html}");

    harness.interact(|handles| handles.dispatch().call(QuizIntent::Next));
    let html = harness.render();
    assert!(
        html.contains("Wie heißt die Adresse auf Schicht 2?"),
        "missing second prompt in {html}"
    );
    assert!(
        html.contains("Aktueller Punktestand: 1 / 2."),
        "score not updated in {html}"
    );

    harness.interact(|handles| {
        handles.text().set("hardware-adresse".to_string());
        handles.dispatch().call(QuizIntent::Check);
    });
    let html = harness.render();
    assert!(html.contains("Richtig (FT)!"), "missing ft feedback in {html}");
    assert_eq!(harness.quiz.snapshot().correct, Some(true));
}

#[test]
fn quiz_view_inputs_follow_signals_and_clear_on_restart() {
    let mut harness = setup_quiz_harness(QUIZ_TABLE);
    harness.rebuild();

    harness.interact(|handles| handles.selection().set([OptionKey::B].into_iter().collect()));
    let html = harness.render();
    assert!(html.contains("checked"), "selection not rendered in {html}");

    harness.interact(|handles| handles.dispatch().call(QuizIntent::Restart));
    let html = harness.render();
    assert!(!html.contains("checked"), "selection survived restart in {html}");

    harness.interact(|handles| {
        handles.dispatch().call(QuizIntent::Check);
        handles.dispatch().call(QuizIntent::Next);
        handles.text().set("ethernet-adresse".to_string());
    });
    let html = harness.render();
    assert!(html.contains("ethernet-adresse"), "typed answer not rendered in {html}");

    harness.interact(|handles| {
        handles.dispatch().call(QuizIntent::Restart);
        handles.dispatch().call(QuizIntent::Check);
        handles.dispatch().call(QuizIntent::Next);
    });
    let html = harness.render();
    assert!(
        html.contains("Wie heißt die Adresse auf Schicht 2?"),
        "missing second prompt in {html}"
    );
    assert!(!html.contains("ethernet-adresse"), "typed answer survived restart in {html}");
}

#[test]
fn quiz_view_enter_checks_then_advances_free_text() {
    let mut harness = setup_quiz_harness(QUIZ_TABLE);
    harness.rebuild();
    harness.interact(|handles| {
        handles.dispatch().call(QuizIntent::Check);
        handles.dispatch().call(QuizIntent::Next);
        handles.text().set("mac-adresse".to_string());
    });

    harness.interact(|handles| handles.submit().call(()));
    let html = harness.render();
    assert!(html.contains("Richtig (FT)!"), "enter did not check in {html}");
    assert!(html.contains("readonly"), "answer field editable after reveal in {html}");
    assert!(!html.contains("disabled"), "answer field disabled after reveal in {html}");

    harness.interact(|handles| handles.submit().call(()));
    let html = harness.render();
    assert!(html.contains("Quiz beendet!"), "enter did not advance in {html}");
    assert!(
        html.contains("Endergebnis: 1 von 2 korrekt!"),
        "missing final result in {html}"
    );

    harness.interact(|handles| handles.submit().call(()));
    assert_eq!(harness.quiz.snapshot().phase, QuizPhase::Finished);
}

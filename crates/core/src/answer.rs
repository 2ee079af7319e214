//! Answer evaluation.
//!
//! Everything here is pure: the functions judge an [`AnswerInput`] against a
//! [`Question`] and describe the outcome, leaving state changes to the caller.

use std::collections::BTreeSet;

use crate::feedback::Feedback;
use crate::model::{OptionKey, Question, QuestionKind};

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

/// What the user has entered for the current question.
///
/// Only the part matching the question kind is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerInput {
    pub selection: BTreeSet<OptionKey>,
    pub text: String,
}

impl AnswerInput {
    #[must_use]
    pub fn choices(keys: impl IntoIterator<Item = OptionKey>) -> Self {
        Self {
            selection: keys.into_iter().collect(),
            text: String::new(),
        }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            selection: BTreeSet::new(),
            text: text.into(),
        }
    }
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// A selectable multiple-choice option as the UI should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McOption {
    pub key: OptionKey,
    pub label: String,
    pub disabled: bool,
    /// Part of the solution and already revealed.
    pub highlighted: bool,
}

/// Present options of `question` in key order.
///
/// Before reveal every option is enabled; after reveal all are disabled and the
/// solution keys are highlighted. Free-text questions have no options.
#[must_use]
pub fn build_options(question: &Question, revealed: bool) -> Vec<McOption> {
    if !question.is_multiple_choice() {
        return Vec::new();
    }
    let solution = question.solution_set();
    question
        .options()
        .iter()
        .map(|(key, label)| McOption {
            key,
            label: label.to_string(),
            disabled: revealed,
            highlighted: revealed && solution.contains(&key),
        })
        .collect()
}

//
// ─── EVALUATION ────────────────────────────────────────────────────────────────
//

/// Outcome of judging one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: bool,
    pub feedback: Feedback,
    /// Revealed option list; empty for free-text questions.
    pub options: Vec<McOption>,
}

impl Evaluation {
    /// Result of a `check` with no active question.
    #[must_use]
    pub fn no_question() -> Self {
        Self {
            correct: false,
            feedback: Feedback::NoQuestion,
            options: Vec::new(),
        }
    }
}

/// Judge `input` for the active question.
///
/// Returns `None` when the question is already revealed: a repeated check
/// changes nothing. A missing question yields [`Evaluation::no_question`].
#[must_use]
pub fn evaluate_current(
    question: Option<&Question>,
    input: &AnswerInput,
    revealed: bool,
) -> Option<Evaluation> {
    match question {
        None => Some(Evaluation::no_question()),
        Some(_) if revealed => None,
        Some(question) => Some(evaluate(question, input)),
    }
}

/// Judge `input` against `question`.
#[must_use]
pub fn evaluate(question: &Question, input: &AnswerInput) -> Evaluation {
    match question.kind() {
        QuestionKind::MultipleChoice => evaluate_choice(question, &input.selection),
        QuestionKind::FreeText => evaluate_text(question, &input.text),
    }
}

/// Exact set comparison: a missing or an extra key makes the answer wrong.
#[must_use]
pub fn evaluate_choice(question: &Question, selection: &BTreeSet<OptionKey>) -> Evaluation {
    let correct = *selection == question.solution_set();
    let feedback = if correct {
        Feedback::Correct(QuestionKind::MultipleChoice)
    } else {
        Feedback::WrongChoice {
            solution: question.solution().to_vec(),
        }
    };
    Evaluation {
        correct,
        feedback,
        options: build_options(question, true),
    }
}

/// Token-set comparison against each accepted text; the first match wins.
#[must_use]
pub fn evaluate_text(question: &Question, text: &str) -> Evaluation {
    let submitted = tokens(text);
    let correct = !submitted.is_empty()
        && question
            .solution_texts()
            .any(|accepted| tokens(accepted) == submitted);

    let feedback = if correct {
        Feedback::Correct(QuestionKind::FreeText)
    } else {
        Feedback::WrongText {
            accepted: question.solution_texts().map(str::to_string).collect(),
        }
    };
    Evaluation {
        correct,
        feedback,
        options: Vec::new(),
    }
}

/// Split on `;`, `,` and `-`, trim, lowercase and drop empty pieces.
#[must_use]
pub fn tokens(text: &str) -> BTreeSet<String> {
    text.split([';', ',', '-'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

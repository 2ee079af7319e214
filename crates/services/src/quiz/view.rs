use std::collections::BTreeSet;

use quiz_core::answer::McOption;
use quiz_core::model::{OptionKey, QuestionKind};
use storage::QuestionStore;

use super::progress::{Visibility, progress_percent, statistics_line};
use super::state::{QuizPhase, SessionState};

const EMPTY_PROMPT: &str = "Keine Fragen vorhanden.";
const FINISHED_PROMPT: &str = "Quiz beendet!";

/// Everything the presentation layer needs after a transition.
///
/// Strings are final display text; the UI renders them as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub kind: Option<QuestionKind>,
    pub prompt: String,
    pub progress: u8,
    pub options: Vec<McOption>,
    pub selection: BTreeSet<OptionKey>,
    pub text: String,
    pub feedback: String,
    /// Judgement of the revealed question; `None` before reveal.
    pub correct: Option<bool>,
    pub statistics: String,
    pub visibility: Visibility,
    /// 1-based position of the active question; 0 when finished.
    pub position: usize,
    pub total: usize,
    pub score: u32,
    pub mistakes: usize,
}

impl QuizSnapshot {
    /// Project `state` into display form, resolving the question through `store`.
    #[must_use]
    pub fn capture(state: &SessionState, store: &dyn QuestionStore) -> Self {
        let question = state.current_question(store);
        let phase = state.phase();
        let kind = question.map(|question| question.kind());
        let total = state.total();

        let prompt = match (phase, question) {
            _ if total == 0 => EMPTY_PROMPT.to_string(),
            (QuizPhase::Finished, _) => FINISHED_PROMPT.to_string(),
            (_, Some(question)) => question.prompt().to_string(),
            (_, None) => String::new(),
        };
        let correct = (state.revealed() && question.is_some()).then(|| state.last_correct());
        let position = if state.is_finished() {
            0
        } else {
            state.cursor() + 1
        };

        Self {
            phase,
            kind,
            prompt,
            progress: progress_percent(state.cursor(), total),
            options: state.options().to_vec(),
            selection: state.input().selection.clone(),
            text: state.input().text.clone(),
            feedback: state.feedback().to_string(),
            correct,
            statistics: statistics_line(state.score(), total, state.is_finished()),
            visibility: Visibility::for_phase(phase, kind, !state.mistakes().is_empty()),
            position,
            total,
            score: state.score(),
            mistakes: state.mistakes().len(),
        }
    }
}

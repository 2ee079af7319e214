use std::collections::BTreeSet;

use quiz_core::answer::{AnswerInput, Evaluation, McOption, build_options};
use quiz_core::model::{Question, QuestionId};
use quiz_core::Feedback;
use storage::QuestionStore;

/// Where a quiz pass currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Current question shown, not yet judged.
    Answering,
    /// Current question judged, solution visible.
    Revealed,
    /// Cursor past the end of the order (or nothing to ask).
    Finished,
}

/// Mutable record of one quiz pass.
///
/// Invariants: `cursor <= order.len()`; `options` is non-empty only while the
/// active question is multiple choice; the mistake bank holds each id once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    order: Vec<QuestionId>,
    cursor: usize,
    score: u32,
    revealed: bool,
    last_correct: bool,
    options: Vec<McOption>,
    mistakes: BTreeSet<QuestionId>,
    input: AnswerInput,
    feedback: Feedback,
}

impl SessionState {
    /// Fresh pass over `order` with an empty mistake bank.
    #[must_use]
    pub fn new(order: Vec<QuestionId>, store: &dyn QuestionStore) -> Self {
        let mut state = Self {
            order,
            ..Self::default()
        };
        state.sync_options(store);
        state
    }

    #[must_use]
    pub fn order(&self) -> &[QuestionId] {
        &self.order
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn last_correct(&self) -> bool {
        self.last_correct
    }

    #[must_use]
    pub fn options(&self) -> &[McOption] {
        &self.options
    }

    #[must_use]
    pub fn mistakes(&self) -> &BTreeSet<QuestionId> {
        &self.mistakes
    }

    #[must_use]
    pub fn input(&self) -> &AnswerInput {
        &self.input
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.is_finished() {
            QuizPhase::Finished
        } else if self.revealed {
            QuizPhase::Revealed
        } else {
            QuizPhase::Answering
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// Id under the cursor, if any.
    #[must_use]
    pub fn current_id(&self) -> Option<QuestionId> {
        self.order.get(self.cursor).copied()
    }

    /// Question under the cursor, resolved through `store`.
    #[must_use]
    pub fn current_question<'s>(&self, store: &'s dyn QuestionStore) -> Option<&'s Question> {
        self.current_id().and_then(|id| store.question(id))
    }

    //
    // ─── TRANSITION PRIMITIVES ──────────────────────────────────────────────
    //

    /// Record a judgement for the active question.
    pub(crate) fn reveal(&mut self, evaluation: Evaluation, input: &AnswerInput) {
        self.revealed = true;
        self.last_correct = evaluation.correct;
        self.feedback = evaluation.feedback;
        self.options = evaluation.options;
        self.input = input.clone();
    }

    /// `check` with nothing to judge.
    pub(crate) fn reveal_missing(&mut self) {
        self.revealed = true;
        self.last_correct = false;
        self.feedback = Feedback::NoQuestion;
        self.options.clear();
    }

    /// Score the revealed question and move past it.
    ///
    /// Returns the id that went into the mistake bank, if any.
    pub(crate) fn advance_scored(&mut self) -> Option<QuestionId> {
        let id = self.current_id()?;
        let missed = if self.last_correct {
            self.score = self.score.saturating_add(1);
            None
        } else {
            self.mistakes.insert(id);
            Some(id)
        };
        self.cursor += 1;
        missed
    }

    /// Move past the current question without scoring, never beyond the end.
    pub(crate) fn advance_unscored(&mut self) {
        self.cursor = (self.cursor + 1).min(self.order.len());
    }

    /// Drop per-question state before the next question is shown.
    pub(crate) fn clear_question(&mut self) {
        self.revealed = false;
        self.last_correct = false;
        self.input = AnswerInput::default();
        self.feedback = Feedback::None;
        self.options.clear();
    }

    /// Replace the pass wholesale; the mistake bank is emptied.
    pub(crate) fn reset(&mut self, order: Vec<QuestionId>) {
        *self = Self {
            order,
            ..Self::default()
        };
    }

    /// Take the mistake bank, leaving it empty.
    pub(crate) fn take_mistakes(&mut self) -> Vec<QuestionId> {
        std::mem::take(&mut self.mistakes).into_iter().collect()
    }

    /// Rebuild the option list for an unrevealed multiple-choice question.
    ///
    /// Revealed options are kept as judged; anything else has no options.
    pub(crate) fn sync_options(&mut self, store: &dyn QuestionStore) {
        match self.current_question(store) {
            Some(question) if question.is_multiple_choice() => {
                if !self.revealed {
                    self.options = build_options(question, false);
                }
            }
            _ => self.options.clear(),
        }
    }
}

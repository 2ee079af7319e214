use std::fmt;
use std::sync::Arc;

use quiz_core::answer::{AnswerInput, evaluate_current};
use storage::QuestionStore;
use tracing::{debug, info, warn};

use super::sequencer::Sequencer;
use super::state::SessionState;

/// User intents understood by the progression engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizIntent {
    /// Start over with a fresh shuffle of every eligible question.
    Restart,
    /// Judge the current answer input.
    Check,
    /// Move on to the next question.
    Next,
    /// Replay the questions missed during the last pass.
    RepeatMistakes,
}

/// Drives a [`SessionState`] through its transitions.
///
/// The question store and the permutation provider are injected here; each call
/// to [`ProgressionEngine::apply_intent`] is one complete transition.
pub struct ProgressionEngine {
    store: Arc<dyn QuestionStore>,
    sequencer: Box<dyn Sequencer>,
}

impl ProgressionEngine {
    #[must_use]
    pub fn new(store: Arc<dyn QuestionStore>, sequencer: Box<dyn Sequencer>) -> Self {
        Self { store, sequencer }
    }

    #[must_use]
    pub fn store(&self) -> &dyn QuestionStore {
        self.store.as_ref()
    }

    /// A fresh pass over all eligible questions.
    pub fn start(&mut self) -> SessionState {
        let order = self.sequencer.shuffle(self.store.ids());
        SessionState::new(order, self.store.as_ref())
    }

    /// Apply one intent and return the resulting state.
    ///
    /// `input` is only consulted by [`QuizIntent::Check`]. Intents whose
    /// precondition does not hold leave the state unchanged, except `Next`,
    /// which always moves the cursor forward (clamped to the end).
    pub fn apply_intent(
        &mut self,
        mut state: SessionState,
        intent: QuizIntent,
        input: &AnswerInput,
    ) -> SessionState {
        match intent {
            QuizIntent::Restart => self.restart(&mut state),
            QuizIntent::RepeatMistakes => self.repeat_mistakes(&mut state),
            QuizIntent::Check => self.check(&mut state, input),
            QuizIntent::Next => self.next(&mut state),
        }
        state.sync_options(self.store.as_ref());
        state
    }

    fn restart(&mut self, state: &mut SessionState) {
        let order = self.sequencer.shuffle(self.store.ids());
        info!(questions = order.len(), "quiz restarted");
        state.reset(order);
    }

    fn repeat_mistakes(&mut self, state: &mut SessionState) {
        if state.mistakes().is_empty() {
            debug!("repeat mistakes ignored: mistake bank is empty");
            return;
        }
        let missed = state.take_mistakes();
        let order = self.sequencer.shuffle(missed);
        info!(questions = order.len(), "replaying missed questions");
        state.reset(order);
    }

    fn check(&self, state: &mut SessionState, input: &AnswerInput) {
        if state.is_finished() {
            debug!(cursor = state.cursor(), "check without an active question");
            state.reveal_missing();
            return;
        }

        let question = state.current_question(self.store.as_ref());
        if question.is_none() {
            warn!(id = ?state.current_id(), "ordered question missing from store");
        }
        match evaluate_current(question, input, state.revealed()) {
            Some(evaluation) => {
                debug!(
                    id = ?state.current_id(),
                    correct = evaluation.correct,
                    "answer checked"
                );
                state.reveal(evaluation, input);
            }
            None => debug!(id = ?state.current_id(), "check ignored: already revealed"),
        }
    }

    fn next(&self, state: &mut SessionState) {
        if state.revealed() && !state.is_finished() {
            if let Some(id) = state.advance_scored() {
                debug!(%id, "question added to mistake bank");
            }
        } else {
            debug!(
                cursor = state.cursor(),
                revealed = state.revealed(),
                "next without a revealed question"
            );
            state.advance_unscored();
        }
        state.clear_question();
        if state.is_finished() {
            info!(
                score = state.score(),
                total = state.total(),
                mistakes = state.mistakes().len(),
                "quiz pass finished"
            );
        }
    }
}

impl fmt::Debug for ProgressionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressionEngine")
            .field("questions", &self.store.eligible_questions().len())
            .finish_non_exhaustive()
    }
}

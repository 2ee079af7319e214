use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::answer::AnswerInput;
use storage::QuestionStore;
use tracing::debug;

use super::engine::{ProgressionEngine, QuizIntent};
use super::sequencer::Sequencer;
use super::state::SessionState;
use super::view::QuizSnapshot;

struct Inner {
    engine: ProgressionEngine,
    state: SessionState,
}

/// Shareable quiz session.
///
/// Intents are serialized through a single lock, so each one is applied as a
/// whole before the next is looked at. Callers only ever see snapshots.
pub struct QuizService {
    inner: Mutex<Inner>,
}

impl QuizService {
    /// Start a session with a fresh shuffle of every question in `store`.
    #[must_use]
    pub fn new(store: Arc<dyn QuestionStore>, sequencer: Box<dyn Sequencer>) -> Self {
        let mut engine = ProgressionEngine::new(store, sequencer);
        let state = engine.start();
        Self {
            inner: Mutex::new(Inner { engine, state }),
        }
    }

    /// Apply `intent` and return the resulting snapshot.
    pub fn dispatch(&self, intent: QuizIntent, input: &AnswerInput) -> QuizSnapshot {
        let mut guard = self.lock();
        let inner = &mut *guard;
        debug!(?intent, "dispatching quiz intent");
        let next = inner.engine.apply_intent(inner.state.clone(), intent, input);
        inner.state = next;
        QuizSnapshot::capture(&inner.state, inner.engine.store())
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        let guard = self.lock();
        QuizSnapshot::capture(&guard.state, guard.engine.store())
    }

    /// Copy of the raw session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    // A poisoned lock still guards the last committed state: transitions run on
    // a copy that replaces it only once complete.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.lock();
        f.debug_struct("QuizService")
            .field("engine", &guard.engine)
            .field("cursor", &guard.state.cursor())
            .field("total", &guard.state.total())
            .finish_non_exhaustive()
    }
}

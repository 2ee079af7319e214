mod engine;
mod progress;
mod sequencer;
mod service;
mod state;
mod view;

// Public API of the quiz subsystem.
pub use engine::{ProgressionEngine, QuizIntent};
pub use progress::{Visibility, progress_percent, statistics_line};
pub use sequencer::{
    IdentitySequencer, RandomSequencer, SeededSequencer, Sequencer, sequencer_for_seed,
};
pub use service::QuizService;
pub use state::{QuizPhase, SessionState};
pub use view::QuizSnapshot;

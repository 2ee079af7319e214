#![forbid(unsafe_code)]

pub mod quiz;

pub use quiz_core::AnswerInput;

pub use quiz::{
    IdentitySequencer, ProgressionEngine, QuizIntent, QuizPhase, QuizService, QuizSnapshot,
    RandomSequencer, SeededSequencer, Sequencer, SessionState, Visibility, sequencer_for_seed,
};

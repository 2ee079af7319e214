mod quiz_vm;

pub use quiz_vm::{OptionRowVm, QuizVm, map_quiz_snapshot};

mod ids;
mod options;
mod question;

pub use ids::QuestionId;
pub use options::{OptionKey, OptionTable, ParseOptionKeyError};
pub use question::{ParseKindError, Question, QuestionDraft, QuestionError, QuestionKind};

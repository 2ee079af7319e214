use thiserror::Error;

use crate::model::{ParseOptionKeyError, QuestionError};

/// Any failure turning raw source values into a validated question.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    OptionKey(#[from] ParseOptionKeyError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}

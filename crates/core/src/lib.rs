#![forbid(unsafe_code)]

pub mod answer;
pub mod error;
pub mod feedback;
pub mod model;

pub use answer::{AnswerInput, Evaluation, McOption};
pub use error::Error;
pub use feedback::Feedback;

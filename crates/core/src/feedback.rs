use std::fmt;

use crate::model::{OptionKey, QuestionKind};

/// Message shown after a `check`, rendered through `Display`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Feedback {
    /// Nothing to report (fresh question).
    #[default]
    None,
    Correct(QuestionKind),
    /// Wrong multiple-choice selection; lists the solution letters.
    WrongChoice { solution: Vec<OptionKey> },
    /// Wrong free-text answer; lists every accepted text.
    WrongText { accepted: Vec<String> },
    /// `check` fired while no question was active.
    NoQuestion,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::None => Ok(()),
            Feedback::Correct(kind) => write!(f, "Richtig ({kind})!"),
            Feedback::WrongChoice { solution } => {
                let letters = solution
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Falsch! Richtige Lösung(en): {letters}")
            }
            Feedback::WrongText { accepted } => match accepted.as_slice() {
                [single] => write!(f, "Falsch! Richtige Antwort: {single}"),
                many => write!(f, "Falsch! Richtige Antworten: {}", many.join(", ")),
            },
            Feedback::NoQuestion => f.write_str("Keine Frage mehr verfügbar."),
        }
    }
}

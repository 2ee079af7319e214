use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::options::{OptionKey, OptionTable};

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Pick every correct option (`MC` in the source table).
    MultipleChoice,
    /// Type the answer (`FT` in the source table).
    FreeText,
}

impl QuestionKind {
    /// Source-table code for this kind.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "MC",
            QuestionKind::FreeText => "FT",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported question type: {raw:?}")]
pub struct ParseKindError {
    raw: String,
}

impl FromStr for QuestionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "MC" => Ok(QuestionKind::MultipleChoice),
            "FT" => Ok(QuestionKind::FreeText),
            _ => Err(ParseKindError { raw: s.to_string() }),
        }
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as read from a source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub prompt: String,
    pub solution: Vec<OptionKey>,
    pub options: OptionTable,
}

impl QuestionDraft {
    /// Check the draft against the question invariants.
    ///
    /// Duplicate solution keys collapse to their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, the solution is empty, or a
    /// solution key points at an absent option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let mut solution = Vec::with_capacity(self.solution.len());
        for key in self.solution {
            if !self.options.contains(key) {
                return Err(QuestionError::MissingOption { key });
            }
            if !solution.contains(&key) {
                solution.push(key);
            }
        }
        if solution.is_empty() {
            return Err(QuestionError::EmptySolution);
        }

        Ok(Question {
            id: self.id,
            kind: self.kind,
            prompt: prompt.to_string(),
            solution,
            options: self.options,
        })
    }
}

/// A validated, immutable question record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    solution: Vec<OptionKey>,
    options: OptionTable,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Solution keys in source order, without duplicates. Never empty.
    #[must_use]
    pub fn solution(&self) -> &[OptionKey] {
        &self.solution
    }

    #[must_use]
    pub fn solution_set(&self) -> BTreeSet<OptionKey> {
        self.solution.iter().copied().collect()
    }

    /// Option texts referenced by the solution, in solution order.
    pub fn solution_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.solution
            .iter()
            .filter_map(|key| self.options.get(*key))
    }

    #[must_use]
    pub fn options(&self) -> &OptionTable {
        &self.options
    }

    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        self.kind == QuestionKind::MultipleChoice
    }
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("solution lists no option")]
    EmptySolution,

    #[error("solution key '{key}' has no option text")]
    MissingOption { key: OptionKey },
}

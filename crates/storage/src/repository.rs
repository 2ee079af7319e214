use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId, QuestionKind};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while loading the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse question table: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read workbook: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("workbook has no worksheet")]
    EmptyWorkbook,

    #[error("no question file found (tried {})", tried.iter().map(|path| path.display().to_string()).collect::<Vec<_>>().join(", "))]
    NoSource { tried: Vec<PathBuf> },

    #[error("question table is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("invalid question on line {line}: {source}")]
    InvalidRow {
        line: u64,
        #[source]
        source: quiz_core::Error,
    },
}

/// Read-only access to the eligible questions of one quiz.
///
/// Implementations never change their contents once handed to a session.
pub trait QuestionStore: Send + Sync {
    /// Every eligible question, ordered by id.
    fn eligible_questions(&self) -> &[Question];

    /// Look up a question by id.
    fn question(&self, id: QuestionId) -> Option<&Question>;

    /// Ids of every eligible question, ordered.
    fn ids(&self) -> Vec<QuestionId> {
        self.eligible_questions().iter().map(Question::id).collect()
    }
}

/// Loads a question bank from some backing source.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Read, validate and filter the source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source is missing, malformed, or contains an
    /// eligible question that fails validation.
    async fn load(&self) -> Result<QuestionBank, StorageError>;
}

/// Immutable in-memory question bank.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    index: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// Build a bank; questions are sorted by id and later duplicates dropped.
    #[must_use]
    pub fn new(mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(Question::id);
        questions.dedup_by_key(|question| question.id());
        let index = questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id(), position))
            .collect();
        Self { questions, index }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions of the given kind.
    #[must_use]
    pub fn count_kind(&self, kind: QuestionKind) -> usize {
        self.questions
            .iter()
            .filter(|question| question.kind() == kind)
            .count()
    }
}

impl QuestionStore for QuestionBank {
    fn eligible_questions(&self) -> &[Question] {
        &self.questions
    }

    fn question(&self, id: QuestionId) -> Option<&Question> {
        self.index.get(&id).map(|position| &self.questions[*position])
    }
}

//! Question table sources: CSV, XLSX, and the CSV-then-XLSX chain.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::StringRecord;
use quiz_core::model::{Question, QuestionId};
use tracing::{debug, info};

use crate::repository::{QuestionBank, QuestionSource, StorageError};

mod fallback;
mod record;
mod workbook;

pub use fallback::{TableQuestionSource, source_for_path};
pub use record::REQUIRED_COLUMNS;
pub use workbook::{XlsxQuestionSource, parse_workbook};
use record::QuestionRow;

/// Reads the question table from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvQuestionSource {
    path: PathBuf,
}

impl CsvQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for CsvQuestionSource {
    async fn load(&self) -> Result<QuestionBank, StorageError> {
        let bytes = read_file(&self.path).await?;
        let bank = parse_questions(bytes.as_slice())?;
        info!(
            path = %self.path.display(),
            questions = bank.len(),
            "loaded question bank"
        );
        Ok(bank)
    }
}

pub(crate) async fn read_file(path: &Path) -> Result<Vec<u8>, StorageError> {
    tokio::fs::read(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Parse, filter and validate a CSV question table.
///
/// Question ids are the 0-based positions of the data rows, counting rows that
/// are filtered out.
///
/// # Errors
///
/// Returns `StorageError::MissingColumns` if a required header is absent,
/// `StorageError::Csv` for malformed CSV, and `StorageError::InvalidRow` for an
/// eligible row that is not a valid question.
pub fn parse_questions(reader: impl Read) -> Result<QuestionBank, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let rows = reader
        .into_records()
        .map(|record| -> Result<(u64, StringRecord), StorageError> {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);
            Ok((line, record))
        });
    collect_questions(&headers, rows)
}

/// Shared row pipeline: column check, eligibility filter, position ids and
/// validation. Each row carries the 1-based line it came from.
pub(crate) fn collect_questions(
    headers: &StringRecord,
    rows: impl IntoIterator<Item = Result<(u64, StringRecord), StorageError>>,
) -> Result<QuestionBank, StorageError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| (*column).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StorageError::MissingColumns { missing });
    }

    let mut questions: Vec<Question> = Vec::new();
    let mut skipped = 0_usize;

    for (position, row) in rows.into_iter().enumerate() {
        let (line, record) = row?;
        let row: QuestionRow = record.deserialize(Some(headers))?;

        let Some(kind) = row.eligible_kind() else {
            debug!(line, "skipping ineligible question row");
            skipped += 1;
            continue;
        };

        let id = QuestionId::new(position as u64);
        let question = row
            .into_draft(id, kind)
            .and_then(|draft| draft.validate().map_err(quiz_core::Error::from))
            .map_err(|source| StorageError::InvalidRow { line, source })?;
        questions.push(question);
    }

    debug!(eligible = questions.len(), skipped, "filtered question table");
    Ok(QuestionBank::new(questions))
}

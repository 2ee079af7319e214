use std::path::Path;

use async_trait::async_trait;
use tracing::warn;

use super::{CsvQuestionSource, XlsxQuestionSource};
use crate::repository::{QuestionBank, QuestionSource, StorageError};

/// CSV table with a workbook of the same name as fallback.
///
/// The workbook is read when the CSV is missing or cannot be read as CSV.
/// Column and row errors in a readable CSV are final.
#[derive(Debug, Clone)]
pub struct TableQuestionSource {
    csv: CsvQuestionSource,
    workbook: XlsxQuestionSource,
}

impl TableQuestionSource {
    /// `quiz_data.csv` falls back to `quiz_data.xlsx` in the same directory.
    #[must_use]
    pub fn new(csv_path: impl AsRef<Path>) -> Self {
        let csv_path = csv_path.as_ref();
        Self {
            csv: CsvQuestionSource::new(csv_path),
            workbook: XlsxQuestionSource::new(csv_path.with_extension("xlsx")),
        }
    }

    #[must_use]
    pub fn csv_path(&self) -> &Path {
        self.csv.path()
    }

    #[must_use]
    pub fn workbook_path(&self) -> &Path {
        self.workbook.path()
    }
}

#[async_trait]
impl QuestionSource for TableQuestionSource {
    async fn load(&self) -> Result<QuestionBank, StorageError> {
        let csv_err = match self.csv.load().await {
            Ok(bank) => return Ok(bank),
            Err(
                err @ (StorageError::NotFound { .. }
                | StorageError::Io { .. }
                | StorageError::Csv(_)),
            ) => err,
            Err(err) => return Err(err),
        };
        warn!(
            csv = %self.csv_path().display(),
            workbook = %self.workbook_path().display(),
            error = %csv_err,
            "csv unavailable, trying workbook"
        );

        match self.workbook.load().await {
            Err(StorageError::NotFound { .. }) => match csv_err {
                StorageError::NotFound { .. } => Err(StorageError::NoSource {
                    tried: vec![
                        self.csv_path().to_path_buf(),
                        self.workbook_path().to_path_buf(),
                    ],
                }),
                other => Err(other),
            },
            result => result,
        }
    }
}

/// Pick the source for a data path: `.xlsx` reads the workbook directly,
/// anything else is a CSV table with workbook fallback.
#[must_use]
pub fn source_for_path(path: &Path) -> Box<dyn QuestionSource> {
    let is_workbook = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if is_workbook {
        Box::new(XlsxQuestionSource::new(path))
    } else {
        Box::new(TableQuestionSource::new(path))
    }
}

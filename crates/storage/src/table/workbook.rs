use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use csv::StringRecord;
use tracing::info;

use super::{collect_questions, read_file};
use crate::repository::{QuestionBank, QuestionSource, StorageError};

/// Reads the question table from the first worksheet of an XLSX workbook.
#[derive(Debug, Clone)]
pub struct XlsxQuestionSource {
    path: PathBuf,
}

impl XlsxQuestionSource {
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
impl QuestionSource for XlsxQuestionSource {
    async fn load(&self) -> Result<QuestionBank, StorageError> {
        let bytes = read_file(&self.path).await?;
        let bank = parse_workbook(Cursor::new(bytes))?;
        info!(
            path = %self.path.display(),
            questions = bank.len(),
            "loaded question bank from workbook"
        );
        Ok(bank)
    }
}

fn cell_text(cell: &Data) -> String {
    cell.to_string()
}

/// Parse the first worksheet of a workbook the same way as a CSV table.
///
/// The first used row holds the headers. Numeric cells keep their display
/// form, so `80` stays `80`. Row numbers in errors are worksheet rows.
///
/// # Errors
///
/// Returns `StorageError::Xlsx` if the workbook cannot be opened,
/// `StorageError::EmptyWorkbook` when it has no worksheet, and the same
/// column and row errors as [`super::parse_questions`].
pub fn parse_workbook<RS: Read + Seek>(reader: RS) -> Result<QuestionBank, StorageError> {
    let mut workbook: Xlsx<RS> = open_workbook_from_rs(reader)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(StorageError::EmptyWorkbook)??;

    let header_line = range.start().map_or(1, |(row, _)| u64::from(row) + 1);
    let mut rows = range.rows();
    let headers: StringRecord = rows
        .next()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| cell_text(cell).trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let records = rows.enumerate().map(|(offset, cells)| {
        let record: StringRecord = cells.iter().map(cell_text).collect();
        Ok::<_, StorageError>((header_line + 1 + offset as u64, record))
    });
    collect_questions(&headers, records)
}

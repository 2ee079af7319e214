#![forbid(unsafe_code)]

pub mod repository;
pub mod table;

pub use repository::{QuestionBank, QuestionSource, QuestionStore, StorageError};
pub use table::{
    CsvQuestionSource, TableQuestionSource, XlsxQuestionSource, parse_questions, parse_workbook,
    source_for_path,
};

//! Loader for the merged DH-LCM dataset
//!
//! - `table`: column-major in-memory table with typed columns
//! - `loader`: CSV ingestion with numeric/text type inference

mod table;
mod loader;

pub use table::{Column, DataTable};

use std::path::PathBuf;

/// Errors raised while loading or querying the record table.
///
/// Every variant is fatal for the run: without the expected columns the
/// analysis cannot produce a meaningful report.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to open dataset {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(String),

    #[error("Dataset has no header row")]
    EmptyHeader,

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Column {column} is not {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("Column {column} has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

//! CSV ingestion with type inference
//!
//! Cells matching a configured null token become missing values. A column
//! is numeric when every non-missing cell parses as `f64`; a column with no
//! values at all is numeric too, so it reaches the scanners and is reported
//! as undefined there rather than disappearing silently.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::{Column, DataTable, DatasetError};
use crate::config::LoaderConfig;

impl DataTable {
    /// Load a CSV file.
    pub fn from_path(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, config)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            numeric = table.numeric_columns().len(),
            "Loaded dataset"
        );
        Ok(table)
    }

    /// Parse CSV from any reader (first row is the header).
    pub fn from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<Self, DatasetError> {
        let delimiter = config
            .delimiter_byte()
            .ok_or_else(|| DatasetError::InvalidDelimiter(config.delimiter.clone()))?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        if names.is_empty() || names.iter().all(String::is_empty) {
            return Err(DatasetError::EmptyHeader);
        }

        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
        for record in csv_reader.records() {
            let record = record?;
            for (cells, value) in raw.iter_mut().zip(record.iter()) {
                cells.push(if config.is_null(value) {
                    None
                } else {
                    Some(value.to_string())
                });
            }
        }

        let columns = names
            .iter()
            .zip(raw)
            .map(|(name, cells)| {
                let column = infer_column(cells);
                debug!(column = %name, numeric = column.is_numeric(), "Inferred column type");
                column
            })
            .collect();

        Self::new(names, columns)
    }
}

/// Numeric if every present cell parses; otherwise keep the text.
fn infer_column(cells: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(s) => s.parse::<f64>().ok().map(Some),
        })
        .collect();

    match parsed {
        Some(values) => Column::Numeric(values),
        None => Column::Text(cells),
    }
}

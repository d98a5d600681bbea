//! Column-major record table

use std::collections::{HashMap, HashSet};

use super::DatasetError;
use crate::types::ProcessStage;

/// One typed column. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// Number of non-null cells.
    pub fn non_null_count(&self) -> usize {
        match self {
            Self::Numeric(v) => v.iter().filter(|c| c.is_some()).count(),
            Self::Text(v) => v.iter().filter(|c| c.is_some()).count(),
        }
    }

    pub fn is_null(&self, row: usize) -> bool {
        match self {
            Self::Numeric(v) => v.get(row).map_or(true, Option::is_none),
            Self::Text(v) => v.get(row).map_or(true, Option::is_none),
        }
    }

    /// Cell rendered as text; numeric cells use their shortest float form,
    /// so an identifier read as `7` and one read as `7.0` compare equal.
    pub fn display_value(&self, row: usize) -> Option<String> {
        match self {
            Self::Numeric(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            Self::Text(v) => v.get(row).cloned().flatten(),
        }
    }

    fn select(&self, rows: &[usize]) -> Self {
        match self {
            Self::Numeric(v) => Self::Numeric(rows.iter().map(|&r| v[r]).collect()),
            Self::Text(v) => Self::Text(rows.iter().map(|&r| v[r].clone()).collect()),
        }
    }
}

/// In-memory record table: rows are plant-level observations, columns are
/// grouped by process prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    names: Vec<String>,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    row_count: usize,
}

impl DataTable {
    /// Build a table from parallel name/column lists.
    pub fn new(names: Vec<String>, columns: Vec<Column>) -> Result<Self, DatasetError> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut index = HashMap::with_capacity(names.len());

        for (i, (name, column)) in names.iter().zip(&columns).enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(DatasetError::DuplicateColumn(name.clone()));
            }
            if column.len() != row_count {
                return Err(DatasetError::LengthMismatch {
                    column: name.clone(),
                    expected: row_count,
                    actual: column.len(),
                });
            }
        }

        Ok(Self {
            names,
            columns,
            index,
            row_count,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, DatasetError> {
        self.index
            .get(name)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }

    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>], DatasetError> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            Column::Text(_) => Err(DatasetError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
            }),
        }
    }

    pub fn text(&self, name: &str) -> Result<&[Option<String>], DatasetError> {
        match self.column(name)? {
            Column::Text(v) => Ok(v),
            Column::Numeric(_) => Err(DatasetError::ColumnType {
                column: name.to_string(),
                expected: "text",
            }),
        }
    }

    /// Numeric column names in header order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter(|(_, c)| c.is_numeric())
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Column names grouped under one process stage.
    pub fn columns_in_stage(&self, stage: ProcessStage) -> Vec<&str> {
        self.names
            .iter()
            .filter(|n| ProcessStage::from_column(n) == stage)
            .map(String::as_str)
            .collect()
    }

    /// New table with only the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(rows)).collect(),
            index: self.index.clone(),
            row_count: rows.len(),
        }
    }

    /// Deduplicated view keeping the first row of each distinct key.
    ///
    /// Rows with a missing key are dropped: they cannot be attributed to a
    /// plant. Returns the view and the number of null-key rows dropped.
    pub fn dedup_by(&self, key: &str) -> Result<(Self, usize), DatasetError> {
        let column = self.column(key)?;
        let mut seen = HashSet::new();
        let mut keep = Vec::new();
        let mut null_keys = 0;

        for row in 0..self.row_count {
            match column.display_value(row) {
                Some(id) => {
                    if seen.insert(id) {
                        keep.push(row);
                    }
                }
                None => null_keys += 1,
            }
        }

        Ok((self.select_rows(&keep), null_keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::new(
            vec![
                "Induction Plant ID".to_string(),
                "Laboratory Total Embryos".to_string(),
                "Hardening Survived".to_string(),
            ],
            vec![
                Column::Text(vec![
                    Some("P1".into()),
                    Some("P1".into()),
                    Some("P2".into()),
                    None,
                    Some("P3".into()),
                ]),
                Column::Numeric(vec![Some(10.0), Some(10.0), Some(4.0), Some(1.0), None]),
                Column::Numeric(vec![Some(1.0), Some(0.0), Some(1.0), Some(1.0), Some(0.0)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let (view, dropped) = sample().dedup_by("Induction Plant ID").unwrap();
        assert_eq!(view.row_count(), 3);
        assert_eq!(dropped, 1);
        assert_eq!(
            view.numeric("Hardening Survived").unwrap(),
            &[Some(1.0), Some(1.0), Some(0.0)]
        );
    }

    #[test]
    fn test_numeric_ids_dedup_by_value() {
        let table = DataTable::new(
            vec!["id".to_string()],
            vec![Column::Numeric(vec![Some(7.0), Some(7.0), Some(8.0)])],
        )
        .unwrap();
        let (view, _) = table.dedup_by("id").unwrap();
        assert_eq!(view.row_count(), 2);
    }

    #[test]
    fn test_missing_and_mistyped_columns() {
        let table = sample();
        assert!(matches!(
            table.numeric("Nope"),
            Err(DatasetError::MissingColumn(ref c)) if c == "Nope"
        ));
        assert!(matches!(
            table.numeric("Induction Plant ID"),
            Err(DatasetError::ColumnType { expected: "numeric", .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_and_ragged_columns() {
        let dup = DataTable::new(
            vec!["a".to_string(), "a".to_string()],
            vec![Column::Numeric(vec![None]), Column::Numeric(vec![None])],
        );
        assert!(matches!(dup, Err(DatasetError::DuplicateColumn(_))));

        let ragged = DataTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![Column::Numeric(vec![None]), Column::Numeric(vec![None, None])],
        );
        assert!(matches!(ragged, Err(DatasetError::LengthMismatch { .. })));
    }

    #[test]
    fn test_numeric_columns_and_stages() {
        let table = sample();
        assert_eq!(
            table.numeric_columns(),
            vec!["Laboratory Total Embryos", "Hardening Survived"]
        );
        assert_eq!(
            table.columns_in_stage(ProcessStage::Hardening),
            vec!["Hardening Survived"]
        );
    }
}

//! Result CSV export
//!
//! Each run overwrites the previous files; there is no append mode.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::types::{CorrelationResult, RegressionResult};

/// File name of the correlation result set
pub const CORRELATION_FILE: &str = "correlation_results.csv";
/// File name of the regression result set
pub const REGRESSION_FILE: &str = "regression_results.csv";

const CORRELATION_HEADER: [&str; 6] = [
    "Column A",
    "Column B",
    "Correlation Type",
    "Pearson Coefficient",
    "P Value",
    "Samples",
];

const REGRESSION_HEADER: [&str; 9] = [
    "Predictor",
    "Response",
    "Coefficient",
    "Std Error",
    "t Value",
    "P Value",
    "Intercept",
    "R Squared",
    "Samples",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to prepare output {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

pub struct Exporter;

impl Exporter {
    /// Write `correlation_results.csv` under `dir`.
    pub fn write_correlations(
        dir: &Path,
        results: &[CorrelationResult],
    ) -> Result<PathBuf, ExportError> {
        let path = Self::prepare(dir, CORRELATION_FILE)?;
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(CORRELATION_HEADER)?;
        for r in results {
            writer.write_record([
                r.column_a.clone(),
                r.column_b.clone(),
                r.direction.to_string(),
                r.coefficient.to_string(),
                r.p_value.to_string(),
                r.sample_count.to_string(),
            ])?;
        }
        writer.flush().map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), rows = results.len(), "Wrote correlation results");
        Ok(path)
    }

    /// Write `regression_results.csv` under `dir`, in the given order.
    pub fn write_regressions(
        dir: &Path,
        results: &[RegressionResult],
    ) -> Result<PathBuf, ExportError> {
        let path = Self::prepare(dir, REGRESSION_FILE)?;
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(REGRESSION_HEADER)?;
        for r in results {
            writer.write_record([
                r.predictor.clone(),
                r.response.clone(),
                r.coefficient.to_string(),
                r.std_error.to_string(),
                r.t_value.to_string(),
                r.p_value.to_string(),
                r.intercept.to_string(),
                r.r_squared.to_string(),
                r.sample_count.to_string(),
            ])?;
        }
        writer.flush().map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), rows = results.len(), "Wrote regression results");
        Ok(path)
    }

    fn prepare(dir: &Path, file: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(dir.join(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CorrelationDirection;

    fn corr(a: &str, b: &str, r: f64) -> CorrelationResult {
        CorrelationResult {
            column_a: a.into(),
            column_b: b.into(),
            direction: CorrelationDirection::from_coefficient(r),
            coefficient: r,
            p_value: 0.01,
            sample_count: 12,
        }
    }

    #[test]
    fn test_correlation_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = Exporter::write_correlations(
            &dir.path().join("out"),
            &[corr("A", "B", -0.75), corr("B, with comma", "A", 0.6)],
        )
        .unwrap();
        assert_eq!(path.file_name().unwrap(), CORRELATION_FILE);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            CORRELATION_HEADER.to_vec()
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][2], "Negative");
        assert_eq!(&rows[0][3], "-0.75");
        assert_eq!(&rows[1][0], "B, with comma");
    }

    #[test]
    fn test_rerun_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = [corr("A", "B", 0.9), corr("B", "A", 0.9)];
        Exporter::write_correlations(dir.path(), &first).unwrap();
        let path = Exporter::write_correlations(dir.path(), &[]).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn test_regression_csv_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let results: Vec<RegressionResult> = [0.1, 0.4]
            .iter()
            .map(|&se| RegressionResult {
                predictor: "x".into(),
                response: format!("y{se}"),
                coefficient: 1.5,
                std_error: se,
                t_value: 1.5 / se,
                p_value: 0.02,
                intercept: 0.3,
                r_squared: 0.6,
                sample_count: 30,
            })
            .collect();
        let path = Exporter::write_regressions(dir.path(), &results).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let responses: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[1].to_string())
            .collect();
        assert_eq!(responses, vec!["y0.1", "y0.4"]);
    }
}

//! Scatter plot specifications for retained findings.
//!
//! The numeric core never draws anything. It produces [`ScatterSpec`]s and
//! hands them to a [`PlotSink`]; rendering is whatever the sink does with
//! them (discard, write JSON for an external renderer, ...).

mod sink;

pub use sink::{JsonPlotSink, NullPlotSink, PlotSink};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::paired::complete_pairs_indexed;
use crate::dataset::{DataTable, DatasetError};
use crate::types::{CorrelationResult, PlantingNumber, RegressionResult};

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("Failed to write plot {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Plot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Which scan produced the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotKind {
    Correlation,
    Regression,
}

/// One plotted row; `ordinal` is the planting-number colour channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub ordinal: u8,
}

/// Fitted line drawn over a regression scatter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitLine {
    pub intercept: f64,
    pub slope: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub kind: PlotKind,
    pub x_column: String,
    pub y_column: String,
    pub title: String,
    pub points: Vec<ScatterPoint>,
    pub fit_line: Option<FitLine>,
}

/// Planting number of every row, for colouring.
pub fn planting_numbers(
    table: &DataTable,
    column: &str,
) -> Result<Vec<PlantingNumber>, DatasetError> {
    let column = table.column(column)?;
    Ok((0..table.row_count())
        .map(|row| {
            column
                .display_value(row)
                .map_or(PlantingNumber::Unmapped, |label| PlantingNumber::parse(&label))
        })
        .collect())
}

impl ScatterSpec {
    fn scatter(
        table: &DataTable,
        x_column: &str,
        y_column: &str,
        planting: &[PlantingNumber],
    ) -> Result<Vec<ScatterPoint>, DatasetError> {
        let x = table.numeric(x_column)?;
        let y = table.numeric(y_column)?;
        Ok(complete_pairs_indexed(x, y)
            .into_iter()
            .map(|(row, x, y)| ScatterPoint {
                x,
                y,
                ordinal: planting
                    .get(row)
                    .copied()
                    .unwrap_or(PlantingNumber::Unmapped)
                    .ordinal(),
            })
            .collect())
    }

    pub fn for_correlation(
        table: &DataTable,
        result: &CorrelationResult,
        planting: &[PlantingNumber],
    ) -> Result<Self, DatasetError> {
        Ok(Self {
            kind: PlotKind::Correlation,
            x_column: result.column_a.clone(),
            y_column: result.column_b.clone(),
            title: format!(
                "{} vs {} (r = {:.3}, {})",
                result.column_a, result.column_b, result.coefficient, result.direction
            ),
            points: Self::scatter(table, &result.column_a, &result.column_b, planting)?,
            fit_line: None,
        })
    }

    pub fn for_regression(
        table: &DataTable,
        result: &RegressionResult,
        planting: &[PlantingNumber],
    ) -> Result<Self, DatasetError> {
        Ok(Self {
            kind: PlotKind::Regression,
            x_column: result.predictor.clone(),
            y_column: result.response.clone(),
            title: format!(
                "{} ~ {} (slope = {:.3}, p = {:.2e})",
                result.response, result.predictor, result.coefficient, result.p_value
            ),
            points: Self::scatter(table, &result.predictor, &result.response, planting)?,
            fit_line: Some(FitLine {
                intercept: result.intercept,
                slope: result.coefficient,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderConfig;
    use crate::types::CorrelationDirection;

    fn table() -> DataTable {
        let csv = "\
Induction Planting Number,A,B
1st,1,2
2nd,2,
Third,3,6
mystery,4,8
";
        DataTable::from_reader(csv.as_bytes(), &LoaderConfig::default()).unwrap()
    }

    #[test]
    fn test_correlation_scatter_colours_by_planting() {
        let table = table();
        let planting = planting_numbers(&table, "Induction Planting Number").unwrap();
        let result = CorrelationResult {
            column_a: "A".into(),
            column_b: "B".into(),
            direction: CorrelationDirection::Positive,
            coefficient: 1.0,
            p_value: 0.0,
            sample_count: 3,
        };
        let spec = ScatterSpec::for_correlation(&table, &result, &planting).unwrap();
        assert_eq!(spec.kind, PlotKind::Correlation);
        assert_eq!(spec.points.len(), 3);
        let ordinals: Vec<u8> = spec.points.iter().map(|p| p.ordinal).collect();
        assert_eq!(ordinals, vec![1, 3, 0]);
        assert!(spec.fit_line.is_none());
    }

    #[test]
    fn test_regression_scatter_carries_fit_line() {
        let table = table();
        let planting = planting_numbers(&table, "Induction Planting Number").unwrap();
        let result = RegressionResult {
            predictor: "A".into(),
            response: "B".into(),
            coefficient: 2.0,
            std_error: 0.1,
            t_value: 20.0,
            p_value: 0.001,
            intercept: 0.0,
            r_squared: 0.99,
            sample_count: 3,
        };
        let spec = ScatterSpec::for_regression(&table, &result, &planting).unwrap();
        assert_eq!(spec.fit_line, Some(FitLine { intercept: 0.0, slope: 2.0 }));
        assert!(spec.title.starts_with("B ~ A"));
    }

    #[test]
    fn test_missing_planting_column() {
        assert!(planting_numbers(&table(), "Nope").is_err());
    }
}

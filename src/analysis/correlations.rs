//! Pairwise Correlation Scanner
//!
//! Pearson correlation over every ordered pair of numeric columns, computed
//! on pairwise-complete rows. A pair is retained when |r| exceeds the
//! configured magnitude threshold (0.5 by default).
//!
//! ## Key Features
//! - Undefined correlations (too few rows, constant or all-null column) are
//!   "not significant", never an error
//! - P-value of r from the t statistic on n - 2 degrees of freedom,
//!   reported alongside
//! - Both visit orders are kept unless `deduplicate_pairs` is set

use tracing::{debug, info};

use super::paired::{complete_pairs, is_constant, mean, two_tailed_p};
use crate::config::CorrelationConfig;
use crate::dataset::{DataTable, DatasetError};
use crate::types::{CorrelationDirection, CorrelationResult};

/// Correlation screening engine
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Correlate two raw columns and apply the magnitude screen.
    ///
    /// # Returns
    /// Some(CorrelationResult) if |r| > threshold, None otherwise (including
    /// when r is undefined)
    pub fn calculate(
        x: &[Option<f64>],
        y: &[Option<f64>],
        x_name: &str,
        y_name: &str,
        config: &CorrelationConfig,
    ) -> Option<CorrelationResult> {
        let (xs, ys) = complete_pairs(x, y);
        let n = xs.len();
        if n < config.min_samples {
            return None;
        }

        let r = Self::pearson(&xs, &ys)?;
        if r.abs() <= config.magnitude_threshold {
            return None;
        }

        Some(CorrelationResult {
            column_a: x_name.to_string(),
            column_b: y_name.to_string(),
            direction: CorrelationDirection::from_coefficient(r),
            coefficient: r,
            p_value: Self::p_value_for_r(r, n),
            sample_count: n,
        })
    }

    /// Calculate Pearson correlation coefficient
    ///
    /// Formula: r = Σ[(xi - x̄)(yi - ȳ)] / sqrt(Σ(xi - x̄)² × Σ(yi - ȳ)²)
    ///
    /// None when fewer than two points or either side is constant.
    pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        if x.len() < 2 || x.len() != y.len() || is_constant(x) || is_constant(y) {
            return None;
        }

        let mean_x = mean(x);
        let mean_y = mean(y);
        let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
        for (a, b) in x.iter().zip(y) {
            let dx = a - mean_x;
            let dy = b - mean_y;
            sxy += dx * dy;
            sxx += dx * dx;
            syy += dy * dy;
        }

        let denominator = (sxx * syy).sqrt();
        if denominator == 0.0 || !denominator.is_finite() {
            return None;
        }
        Some((sxy / denominator).clamp(-1.0, 1.0))
    }

    /// Two-tailed p-value of a Pearson coefficient
    ///
    /// Formula: t = r × sqrt(n-2) / sqrt(1-r²), Student's t with n-2 degrees
    /// of freedom. |r| = 1 gives p = 0 when n > 2; n ≤ 2 has no degrees of
    /// freedom and gives p = 1.
    pub fn p_value_for_r(r: f64, n: usize) -> f64 {
        if n < 3 {
            return 1.0;
        }
        let df = (n - 2) as f64;
        let t_stat = r * df.sqrt() / (1.0 - r * r).max(0.0).sqrt();
        two_tailed_p(t_stat, df)
    }

    /// Scan every ordered pair of numeric columns.
    ///
    /// Results keep scan order: column A in header order, then column B.
    pub fn scan(
        table: &DataTable,
        config: &CorrelationConfig,
    ) -> Result<Vec<CorrelationResult>, DatasetError> {
        let columns: Vec<&str> = table
            .numeric_columns()
            .into_iter()
            .filter(|c| !config.exclude_columns.iter().any(|e| e == c))
            .collect();

        let mut results = Vec::new();
        let mut undefined = 0usize;

        for (i, a) in columns.iter().enumerate() {
            let x = table.numeric(a)?;
            for (j, b) in columns.iter().enumerate() {
                if i == j || (config.deduplicate_pairs && j < i) {
                    continue;
                }
                let y = table.numeric(b)?;
                match Self::calculate(x, y, a, b, config) {
                    Some(result) => {
                        debug!(
                            a = %a,
                            b = %b,
                            r = result.coefficient,
                            n = result.sample_count,
                            "Retained correlation"
                        );
                        results.push(result);
                    }
                    None => {
                        let (xs, ys) = complete_pairs(x, y);
                        if xs.len() < config.min_samples || Self::pearson(&xs, &ys).is_none() {
                            undefined += 1;
                        }
                    }
                }
            }
        }

        info!(
            columns = columns.len(),
            retained = results.len(),
            undefined,
            "Correlation scan complete"
        );
        Ok(results)
    }
}

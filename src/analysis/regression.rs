//! Simple Linear Regression Scanner
//!
//! Fits `response = intercept + slope × predictor` by ordinary least squares
//! for every unordered pair of numeric columns (predictor is the column
//! that comes first in the header). Only the non-response column is a
//! predictor; regressing a column on itself would make the design matrix
//! singular.
//!
//! A fit is retained when the slope's two-tailed p-value lies strictly
//! inside (0, significance_threshold). Retained fits are ordered by
//! ascending standard error.

use tracing::{debug, info};

use super::paired::{complete_pairs, is_constant, mean, two_tailed_p};
use crate::config::RegressionConfig;
use crate::dataset::{DataTable, DatasetError};
use crate::types::RegressionResult;

/// Raw OLS estimates for one column pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    pub intercept: f64,
    pub slope: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
    pub r_squared: f64,
    pub sample_count: usize,
}

/// Regression screening engine
pub struct RegressionEngine;

impl RegressionEngine {
    /// Fit y on [1, x].
    ///
    /// None when there are fewer than 3 points or x is constant.
    pub fn fit(x: &[f64], y: &[f64]) -> Option<OlsFit> {
        let n = x.len();
        if n < 3 || n != y.len() || is_constant(x) {
            return None;
        }

        let mean_x = mean(x);
        let mean_y = mean(y);
        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for (a, b) in x.iter().zip(y) {
            let dx = a - mean_x;
            let dy = b - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let sse: f64 = x
            .iter()
            .zip(y)
            .map(|(a, b)| {
                let residual = b - (intercept + slope * a);
                residual * residual
            })
            .sum();

        let df = (n - 2) as f64;
        let std_error = (sse / df / sxx).sqrt();
        let r_squared = if syy > 0.0 { 1.0 - sse / syy } else { 0.0 };

        let (t_value, p_value) = if std_error > 0.0 {
            let t = slope / std_error;
            (t, two_tailed_p(t, df))
        } else if slope == 0.0 {
            // Constant response: no linear relationship
            (0.0, 1.0)
        } else {
            // Exact fit
            (f64::INFINITY.copysign(slope), 0.0)
        };

        Some(OlsFit {
            intercept,
            slope,
            std_error,
            t_value,
            p_value,
            r_squared,
            sample_count: n,
        })
    }

    /// Fit one raw column pair and apply the significance screen.
    pub fn calculate(
        predictor: &[Option<f64>],
        response: &[Option<f64>],
        predictor_name: &str,
        response_name: &str,
        config: &RegressionConfig,
    ) -> Option<RegressionResult> {
        let (x, y) = complete_pairs(predictor, response);
        if x.len() < config.min_samples {
            return None;
        }

        let fit = Self::fit(&x, &y)?;
        if !(fit.p_value > 0.0 && fit.p_value < config.significance_threshold) {
            return None;
        }

        Some(RegressionResult {
            predictor: predictor_name.to_string(),
            response: response_name.to_string(),
            coefficient: fit.slope,
            std_error: fit.std_error,
            t_value: fit.t_value,
            p_value: fit.p_value,
            intercept: fit.intercept,
            r_squared: fit.r_squared,
            sample_count: fit.sample_count,
        })
    }

    /// Scan every unordered pair of eligible numeric columns.
    ///
    /// Eligible: numeric, not excluded, at least one non-null value.
    pub fn scan(
        table: &DataTable,
        config: &RegressionConfig,
    ) -> Result<Vec<RegressionResult>, DatasetError> {
        let mut columns = Vec::new();
        for name in table.numeric_columns() {
            if config.exclude_columns.iter().any(|e| e == name) {
                continue;
            }
            if table.column(name)?.non_null_count() == 0 {
                debug!(column = %name, "Skipping all-null column");
                continue;
            }
            columns.push(name);
        }

        let mut results = Vec::new();
        let mut fitted = 0usize;
        for (i, a) in columns.iter().enumerate() {
            let x = table.numeric(a)?;
            for b in &columns[i + 1..] {
                let y = table.numeric(b)?;
                fitted += 1;
                if let Some(result) = Self::calculate(x, y, a, b, config) {
                    debug!(
                        predictor = %a,
                        response = %b,
                        slope = result.coefficient,
                        p = result.p_value,
                        "Retained regression"
                    );
                    results.push(result);
                }
            }
        }

        Self::sort_by_std_error(&mut results);

        info!(
            columns = columns.len(),
            pairs = fitted,
            retained = results.len(),
            "Regression scan complete"
        );
        Ok(results)
    }

    /// Ascending standard error.
    pub fn sort_by_std_error(results: &mut [RegressionResult]) {
        results.sort_by(|a, b| a.std_error.total_cmp(&b.std_error));
    }
}

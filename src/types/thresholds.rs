//! Default statistical cut-offs used when no config overrides them

/// Thresholds for correlation and regression screening
pub mod analysis_thresholds {
    /// |r| must be strictly greater than this to retain a correlation
    pub const CORRELATION_MAGNITUDE: f64 = 0.5;
    /// Slope p-value must be strictly below this to retain a regression
    pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;
    /// Minimum pairwise-complete rows for a defined Pearson coefficient
    pub const MIN_CORRELATION_SAMPLES: usize = 2;
    /// Minimum pairwise-complete rows for an OLS fit (n - 2 > 0 df)
    pub const MIN_REGRESSION_SAMPLES: usize = 3;
}

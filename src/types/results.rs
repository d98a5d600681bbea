//! Correlation and regression result records

use serde::{Deserialize, Serialize};

/// Sign of a retained correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

impl CorrelationDirection {
    pub fn from_coefficient(r: f64) -> Self {
        if r < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

impl std::fmt::Display for CorrelationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
        }
    }
}

/// Pearson correlation that passed the magnitude screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub column_a: String,
    pub column_b: String,
    pub direction: CorrelationDirection,
    /// Pearson correlation coefficient (-1 to 1)
    pub coefficient: f64,
    /// Two-tailed p-value of r (Student's t, n-2 df)
    pub p_value: f64,
    /// Pairwise-complete rows used
    pub sample_count: usize,
}

/// Simple OLS fit `response ~ intercept + coefficient * predictor`
/// whose slope passed the significance screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub predictor: String,
    pub response: String,
    /// Slope estimate
    pub coefficient: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub sample_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corr(a: &str, b: &str) -> CorrelationResult {
        CorrelationResult {
            column_a: a.to_string(),
            column_b: b.to_string(),
            direction: CorrelationDirection::Positive,
            coefficient: 0.9,
            p_value: 0.001,
            sample_count: 10,
        }
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(CorrelationDirection::from_coefficient(-0.7), CorrelationDirection::Negative);
        assert_eq!(CorrelationDirection::from_coefficient(0.7), CorrelationDirection::Positive);
        assert_eq!(CorrelationDirection::Negative.to_string(), "Negative");
    }

    #[test]
    fn test_result_serializes_direction_by_name() {
        let json = serde_json::to_string(&corr("A", "B")).unwrap();
        assert!(json.contains("\"direction\":\"Positive\""), "{json}");
    }
}

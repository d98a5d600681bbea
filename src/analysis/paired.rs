//! Pairwise-complete extraction and shared test statistics
//!
//! Each column pair drops only the rows where either side is missing.
//! Nothing is removed from the table itself, so a null in one column never
//! affects the statistics of an unrelated pair.

use statrs::function::beta::checked_beta_reg;

/// Rows where both columns have a value, as two aligned vectors.
pub fn complete_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

/// Same as [`complete_pairs`] but keeps the source row index.
pub fn complete_pairs_indexed(x: &[Option<f64>], y: &[Option<f64>]) -> Vec<(usize, f64, f64)> {
    x.iter()
        .zip(y)
        .enumerate()
        .filter_map(|(i, (a, b))| Some((i, (*a)?, (*b)?)))
        .collect()
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// True when every value equals the first (or there are none).
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Two-tailed Student's t p-value, P(|T| > |t|) = I_{df/(df+t²)}(df/2, 1/2).
///
/// Goes through the regularized incomplete beta because `1 - cdf` rounds
/// to exactly 0 for large |t|. Infinite |t| (an exact fit) gives 0; no
/// degrees of freedom gives 1.
pub fn two_tailed_p(t: f64, df: f64) -> f64 {
    if df.is_nan() || df <= 0.0 || t.is_nan() {
        return 1.0;
    }
    if t.is_infinite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    checked_beta_reg(df / 2.0, 0.5, x).map_or(1.0, |p| p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_pairs_drops_only_incomplete_rows() {
        let x = [Some(1.0), None, Some(3.0), Some(4.0)];
        let y = [Some(2.0), Some(5.0), None, Some(8.0)];
        let (a, b) = complete_pairs(&x, &y);
        assert_eq!(a, vec![1.0, 4.0]);
        assert_eq!(b, vec![2.0, 8.0]);
        assert_eq!(
            complete_pairs_indexed(&x, &y),
            vec![(0, 1.0, 2.0), (3, 4.0, 8.0)]
        );
    }

    #[test]
    fn test_constant_detection() {
        assert!(is_constant(&[2.0, 2.0, 2.0]));
        assert!(is_constant(&[]));
        assert!(!is_constant(&[2.0, 2.5]));
    }

    #[test]
    fn test_two_tailed_p_reference_values() {
        // t = 2.228, df = 10 is the 97.5th percentile
        let p = two_tailed_p(2.228, 10.0);
        assert!((p - 0.05).abs() < 0.001, "got {p}");
        assert!((two_tailed_p(0.0, 10.0) - 1.0).abs() < 1e-12);
        // Far tail stays positive
        let tiny = two_tailed_p(60.0, 50.0);
        assert!(tiny > 0.0 && tiny < 1e-30);
        assert!(two_tailed_p(f64::INFINITY, 5.0).abs() < f64::EPSILON);
        assert!((two_tailed_p(3.0, 0.0) - 1.0).abs() < f64::EPSILON);
    }
}

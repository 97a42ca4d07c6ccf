//! Pearson product-moment correlation with a two-sided p-value.

use super::AssociationError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a Pearson correlation test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PearsonTest {
    /// Correlation coefficient in [-1, 1], or NaN for a zero-variance input.
    pub r: f64,
    /// Two-sided p-value for H0: r = 0.
    pub pvalue: f64,
    /// Number of pairs used.
    pub n: usize,
}

/// Pearson correlation between two equally long samples.
///
/// A constant sample has no defined correlation; `r` and `pvalue` are then
/// NaN rather than an error.
///
/// ```
/// use regclass::association::pearson;
///
/// let test = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
/// assert!((test.r - 1.0).abs() < 1e-12);
/// assert_eq!(test.pvalue, 0.0);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Result<PearsonTest, AssociationError> {
    if x.len() != y.len() {
        return Err(AssociationError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(AssociationError::InsufficientObservations { needed: 2, got: n });
    }

    let x_mean = x.iter().sum::<f64>() / n as f64;
    let y_mean = y.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    // 0/0 for a constant input stays NaN through the clamp.
    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    if r.is_nan() {
        tracing::debug!(n, "pearson correlation undefined for constant input");
    }

    Ok(PearsonTest {
        r,
        pvalue: correlation_pvalue(r, n),
        n,
    })
}

/// Two-sided p-value of a correlation coefficient from `n` pairs.
///
/// t = r * sqrt((n - 2) / (1 - r²)) follows Student's t with n - 2 degrees
/// of freedom under independence.
pub fn correlation_pvalue(r: f64, n: usize) -> f64 {
    if r.is_nan() || n < 2 {
        return f64::NAN;
    }
    if n == 2 {
        return 1.0;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();

    StudentsT::new(0.0, 1.0, df)
        .map_or(f64::NAN, |d| (2.0 * d.sf(t.abs())).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_negative() {
        let test = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert_relative_eq!(test.r, -1.0, epsilon = 1e-12);
        assert_eq!(test.pvalue, 0.0);
        assert_eq!(test.n, 3);
    }

    #[test]
    fn test_known_value() {
        // x = 1..5, y = [2, 1, 4, 3, 5]: Sxy = 8, Sxx = Syy = 10
        let test = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 5.0]).unwrap();
        assert_relative_eq!(test.r, 0.8, epsilon = 1e-12);
        // t = 0.8 * sqrt(3 / 0.36) = 2.3094, df = 3
        assert_relative_eq!(test.pvalue, 0.104088, epsilon = 1e-5);
    }

    #[test]
    fn test_constant_input_is_nan() {
        let test = pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!(test.r.is_nan());
        assert!(test.pvalue.is_nan());
    }

    #[test]
    fn test_two_points() {
        let test = pearson(&[1.0, 2.0], &[5.0, 3.0]).unwrap();
        assert_relative_eq!(test.r, -1.0, epsilon = 1e-12);
        assert_eq!(test.pvalue, 1.0);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            pearson(&[1.0], &[1.0]),
            Err(AssociationError::InsufficientObservations { needed: 2, got: 1 })
        ));
        assert!(matches!(
            pearson(&[1.0, 2.0], &[1.0]),
            Err(AssociationError::LengthMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn test_uncorrelated_pvalue_is_one() {
        // Sxy = 0
        let test = pearson(&[1.0, 2.0, 3.0, 4.0], &[1.0, -1.0, -1.0, 1.0]).unwrap();
        assert_relative_eq!(test.r, 0.0, epsilon = 1e-12);
        assert_relative_eq!(test.pvalue, 1.0, epsilon = 1e-10);
    }
}

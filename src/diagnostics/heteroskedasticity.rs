//! Breusch-Pagan test for heteroskedastic residuals.

use super::DiagnosticsError;
use crate::solvers::{FittedRegressor, OlsRegressor, Regressor};
use faer::{Col, Mat};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Lagrange multiplier and F forms of the Breusch-Pagan test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreuschPagan {
    pub lm: f64,
    pub lm_pvalue: f64,
    pub f_statistic: f64,
    pub f_pvalue: f64,
}

/// Breusch-Pagan test of the null hypothesis that the residual variance does
/// not depend on the regressors in `x`.
///
/// Fits the auxiliary regression `e² ~ 1 + x`; `LM = n R²` is compared with a
/// chi-squared distribution on `x.ncols()` degrees of freedom. The F form is
/// the overall F test of the auxiliary regression. `x` must not contain an
/// intercept column.
pub fn breusch_pagan(residuals: &Col<f64>, x: &Mat<f64>) -> Result<BreuschPagan, DiagnosticsError> {
    breusch_pagan_with(residuals, x, true)
}

/// Breusch-Pagan test with the auxiliary regression fitted with or without an
/// intercept, matching the model the residuals came from.
///
/// Without an intercept, `e² ~ x` is fitted through the origin, `R²` is
/// uncentered and the chi-squared reference has `x.ncols() - 1` degrees of
/// freedom. A single regressor then leaves no degrees of freedom and the
/// LM p-value is `NaN`.
pub fn breusch_pagan_with(
    residuals: &Col<f64>,
    x: &Mat<f64>,
    with_intercept: bool,
) -> Result<BreuschPagan, DiagnosticsError> {
    let n = residuals.nrows();
    if x.nrows() != n {
        return Err(DiagnosticsError::DimensionMismatch {
            rows: x.nrows(),
            residuals: n,
        });
    }
    if x.ncols() == 0 {
        return Err(DiagnosticsError::NoRegressors);
    }

    let squared = Col::from_fn(n, |i| residuals[i] * residuals[i]);
    let first = squared.iter().next().copied().unwrap_or(0.0);
    if with_intercept && squared.iter().all(|&v| (v - first).abs() < 1e-14) {
        tracing::debug!("squared residuals are constant, no heteroskedasticity to detect");
        return Ok(BreuschPagan {
            lm: 0.0,
            lm_pvalue: 1.0,
            f_statistic: f64::NAN,
            f_pvalue: f64::NAN,
        });
    }

    let auxiliary = OlsRegressor::builder()
        .with_intercept(with_intercept)
        .compute_inference(false)
        .build()
        .fit(x, &squared)?;

    let result = auxiliary.result();
    let lm = n as f64 * result.r_squared;
    let dof = (x.ncols() - usize::from(!with_intercept)) as f64;
    let lm_pvalue = ChiSquared::new(dof).map_or(f64::NAN, |d| d.sf(lm));

    tracing::debug!(lm, lm_pvalue, "Breusch-Pagan auxiliary regression fitted");

    Ok(BreuschPagan {
        lm,
        lm_pvalue,
        f_statistic: result.f_statistic,
        f_pvalue: result.f_pvalue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_growing_spread_is_detected() {
        let n = 60;
        let x = Mat::from_fn(n, 1, |i, _| i as f64);
        let e = Col::from_fn(n, |i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            sign * (1.0 + i as f64 * 0.5)
        });
        let bp = breusch_pagan(&e, &x).unwrap();
        assert!(bp.lm > 20.0, "LM = {}", bp.lm);
        assert!(bp.lm_pvalue < 1e-4);
        assert!(bp.f_pvalue < 1e-4);
    }

    #[test]
    fn test_constant_spread() {
        let n = 40;
        let x = Mat::from_fn(n, 1, |i, _| i as f64);
        let e = Col::from_fn(n, |i| if i % 2 == 0 { 1.0 } else { -1.0 });
        let bp = breusch_pagan(&e, &x).unwrap();
        // e² is constant: nothing to explain.
        assert_relative_eq!(bp.lm, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bp.lm_pvalue, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_without_intercept_uses_uncentered_fit() {
        let n = 50;
        let x = Mat::from_fn(n, 2, |i, j| {
            if j == 0 {
                1.0 + i as f64
            } else {
                ((i * 7) as f64).cos()
            }
        });
        let e = Col::from_fn(n, |i| ((i * 3) as f64).sin() * (1.0 + 0.1 * i as f64));

        let bp = breusch_pagan_with(&e, &x, false).unwrap();

        let squared = Col::from_fn(n, |i| e[i] * e[i]);
        let through_origin = OlsRegressor::builder()
            .with_intercept(false)
            .compute_inference(false)
            .build()
            .fit(&x, &squared)
            .unwrap();
        let lm = n as f64 * through_origin.r_squared();
        assert_relative_eq!(bp.lm, lm, epsilon = 1e-10);

        let chi2 = ChiSquared::new(1.0).unwrap();
        assert_relative_eq!(bp.lm_pvalue, chi2.sf(lm), epsilon = 1e-12);
        assert_relative_eq!(bp.f_statistic, through_origin.result().f_statistic, epsilon = 1e-10);

        // The centered version differs on the same data.
        let centered = breusch_pagan(&e, &x).unwrap();
        assert!((centered.lm - bp.lm).abs() > 1e-6);
    }

    #[test]
    fn test_single_regressor_without_intercept_has_no_dof() {
        let x = Mat::from_fn(20, 1, |i, _| 1.0 + i as f64);
        let e = Col::from_fn(20, |i| ((i * 5) as f64).sin() * i as f64);
        let bp = breusch_pagan_with(&e, &x, false).unwrap();
        assert!(bp.lm.is_finite());
        assert!(bp.lm_pvalue.is_nan());
    }

    #[test]
    fn test_dimension_mismatch() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let e = Col::from_fn(4, |i| i as f64);
        assert_eq!(
            breusch_pagan(&e, &x),
            Err(DiagnosticsError::DimensionMismatch {
                rows: 5,
                residuals: 4
            })
        );
    }
}

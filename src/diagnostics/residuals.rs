//! Scaled residuals.

use faer::Col;

fn residual_scale(mse: f64) -> Option<f64> {
    (mse.is_finite() && mse > 0.0).then(|| mse.sqrt())
}

/// `e_i / s` with `s = sqrt(MSE)`.
///
/// With a zero or undefined MSE, exact zeros stay zero and everything else is NaN.
pub fn standardized_residuals(residuals: &Col<f64>, mse: f64) -> Col<f64> {
    match residual_scale(mse) {
        Some(s) => Col::from_fn(residuals.nrows(), |i| residuals[i] / s),
        None => Col::from_fn(residuals.nrows(), |i| {
            if residuals[i].abs() < 1e-14 {
                0.0
            } else {
                f64::NAN
            }
        }),
    }
}

/// Internally studentized residuals: `e_i / (s * sqrt(1 - h_ii))`.
pub fn studentized_residuals(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64) -> Col<f64> {
    let n = residuals.nrows();
    let Some(s) = residual_scale(mse) else {
        return Col::from_fn(n, |_| f64::NAN);
    };
    Col::from_fn(n, |i| residuals[i] / (s * (1.0 - leverage[i]).max(1e-14).sqrt()))
}

/// Externally studentized (deleted) residuals.
///
/// `e_i / (s_(i) * sqrt(1 - h_ii))` where `s_(i)²` is the residual variance
/// with observation `i` left out:
/// `(RSS - e_i² / (1 - h_ii)) / (n - p - 1)`.
pub fn externally_studentized_residuals(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
) -> Col<f64> {
    let n = residuals.nrows();
    let df_resid = n.saturating_sub(n_params);
    if df_resid <= 1 || residual_scale(mse).is_none() {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let rss = mse * df_resid as f64;
    let df_loo = (df_resid - 1) as f64;

    Col::from_fn(n, |i| {
        let e = residuals[i];
        let one_minus_h = (1.0 - leverage[i]).max(1e-14);
        let mse_loo = (rss - e * e / one_minus_h) / df_loo;
        if mse_loo > 0.0 {
            e / (mse_loo * one_minus_h).sqrt()
        } else {
            f64::NAN
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standardized() {
        let e = Col::from_fn(4, |i| i as f64 - 1.5);
        let r = standardized_residuals(&e, 4.0);
        assert_relative_eq!(r[0], -0.75);
        assert_relative_eq!(r[3], 0.75);
    }

    #[test]
    fn test_standardized_zero_mse() {
        let e = Col::from_fn(3, |i| if i == 0 { 0.0 } else { 1.0 });
        let r = standardized_residuals(&e, 0.0);
        assert_eq!(r[0], 0.0);
        assert!(r[1].is_nan());
    }

    #[test]
    fn test_studentized_exceeds_standardized() {
        let e = Col::from_fn(5, |i| (i as f64 - 2.0) * 0.5);
        let h = Col::from_fn(5, |i| 0.1 + 0.1 * i as f64);
        let std = standardized_residuals(&e, 1.0);
        let stu = studentized_residuals(&e, &h, 1.0);
        for i in 0..5 {
            assert!(stu[i].abs() >= std[i].abs());
        }
    }

    #[test]
    fn test_external_needs_residual_df() {
        let e = Col::from_fn(3, |i| i as f64);
        let h = Col::from_fn(3, |_| 0.5);
        let r = externally_studentized_residuals(&e, &h, 1.0, 2);
        assert!(r.iter().all(|v| v.is_nan()));
    }
}

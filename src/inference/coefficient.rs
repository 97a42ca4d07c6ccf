//! Coefficient inference calculations.

use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Standard errors for a model without intercept.
    ///
    /// SE(β_j) = sqrt(σ² * (X'X)^(-1)_{jj})
    pub fn standard_errors(
        x: &Mat<f64>,
        mse: f64,
        aliased: &[bool],
    ) -> Result<Col<f64>, &'static str> {
        let n_features = x.ncols();
        let active = active_columns(x, aliased, false);
        if active.ncols() == 0 {
            return Err("all features are aliased");
        }
        let inv = invert_cross_product(&active)?;

        let mut se = Col::zeros(n_features);
        let mut k = 0;
        for j in 0..n_features {
            if aliased[j] {
                se[j] = f64::NAN;
            } else {
                se[j] = variance_to_se(mse * inv[(k, k)]);
                k += 1;
            }
        }
        Ok(se)
    }

    /// Standard errors for intercept and coefficients from the augmented
    /// design matrix [1 | X].
    ///
    /// Returns (coefficient_SE, intercept_SE).
    pub fn standard_errors_with_intercept(
        x: &Mat<f64>,
        mse: f64,
        aliased: &[bool],
    ) -> Result<(Col<f64>, f64), &'static str> {
        let n_features = x.ncols();
        let augmented = active_columns(x, aliased, true);
        let inv = invert_cross_product(&augmented)?;

        let se_intercept = variance_to_se(mse * inv[(0, 0)]);

        let mut se_coef = Col::zeros(n_features);
        let mut k = 1;
        for j in 0..n_features {
            if aliased[j] {
                se_coef[j] = f64::NAN;
            } else {
                se_coef[j] = variance_to_se(mse * inv[(k, k)]);
                k += 1;
            }
        }

        Ok((se_coef, se_intercept))
    }

    /// t_j = β_j / SE(β_j)
    pub fn t_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        Col::from_fn(coefficients.nrows(), |j| {
            if std_errors[j].is_nan() || std_errors[j] == 0.0 {
                f64::NAN
            } else {
                coefficients[j] / std_errors[j]
            }
        })
    }

    /// Two-tailed p-values: p_j = 2 * P(T > |t_j|), T ~ t(df).
    pub fn p_values(t_statistics: &Col<f64>, df: f64) -> Col<f64> {
        let t_dist = StudentsT::new(0.0, 1.0, df).ok();
        Col::from_fn(t_statistics.nrows(), |j| two_sided_p(t_dist.as_ref(), t_statistics[j]))
    }

    /// CI_j = β_j ± t_{α/2, df} * SE(β_j)
    pub fn confidence_intervals(
        coefficients: &Col<f64>,
        std_errors: &Col<f64>,
        df: f64,
        confidence_level: f64,
    ) -> (Col<f64>, Col<f64>) {
        let n = coefficients.nrows();
        let t_crit = StudentsT::new(0.0, 1.0, df).map_or(f64::NAN, |d| {
            d.inverse_cdf(1.0 - (1.0 - confidence_level) / 2.0)
        });

        let lower = Col::from_fn(n, |j| coefficients[j] - t_crit * std_errors[j]);
        let upper = Col::from_fn(n, |j| coefficients[j] + t_crit * std_errors[j]);
        (lower, upper)
    }
}

/// Two-sided p-value of a t statistic; NaN when undefined.
pub(crate) fn two_sided_p(dist: Option<&StudentsT>, t: f64) -> f64 {
    match dist {
        Some(d) if !t.is_nan() => 2.0 * d.sf(t.abs()),
        _ => f64::NAN,
    }
}

fn variance_to_se(var: f64) -> f64 {
    if var >= 0.0 {
        var.sqrt()
    } else {
        f64::NAN
    }
}

/// Non-aliased columns of `x`, optionally preceded by a column of ones.
fn active_columns(x: &Mat<f64>, aliased: &[bool], with_intercept: bool) -> Mat<f64> {
    let cols: Vec<usize> = (0..x.ncols()).filter(|&j| !aliased[j]).collect();
    let offset = usize::from(with_intercept);
    Mat::from_fn(x.nrows(), cols.len() + offset, |i, k| {
        if k < offset {
            1.0
        } else {
            x[(i, cols[k - offset])]
        }
    })
}

/// (A'A)^(-1) via QR decomposition and back-substitution.
fn invert_cross_product(a: &Mat<f64>) -> Result<Mat<f64>, &'static str> {
    let p = a.ncols();
    let ata = a.transpose() * a;

    let qr = ata.qr();
    let q = qr.compute_Q();
    let r = qr.R();

    for i in 0..p {
        if r[(i, i)].abs() < 1e-10 {
            return Err("matrix is singular");
        }
    }

    // Solve R * X = Q' column by column.
    let qt = q.transpose();
    let mut inv = Mat::zeros(p, p);
    for col in 0..p {
        for i in (0..p).rev() {
            let mut sum = qt[(i, col)];
            for j in (i + 1)..p {
                sum -= r[(i, j)] * inv[(j, col)];
            }
            inv[(i, col)] = sum / r[(i, i)];
        }
    }

    Ok(inv)
}

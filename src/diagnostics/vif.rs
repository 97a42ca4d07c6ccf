//! Variance Inflation Factor (VIF) for multicollinearity detection.

use crate::solvers::{FittedOls, FittedRegressor, OlsRegressor, Regressor};
use faer::{Col, Mat};
use serde::{Deserialize, Serialize};

/// How the auxiliary regressions behind a VIF are fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VifKind {
    /// `x_j` regressed on the other predictors without a constant, scored by
    /// the uncentered R². Matches statsmodels' `variance_inflation_factor`
    /// applied to a design with the constant column removed.
    #[default]
    Uncentered,

    /// `x_j` regressed on the other predictors with an intercept, scored by
    /// the usual centered R². Equals `1 / (1 - r²)` for two predictors with
    /// correlation `r`.
    Centered,
}

/// One row of a VIF table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VifEntry {
    pub variable: String,
    pub vif: f64,
}

/// VIF table for the predictors of a fitted model, uncentered.
///
/// One entry per design matrix column, in column order, named after the
/// model's feature names. The intercept is not listed.
pub fn vif(model: &FittedOls) -> Vec<VifEntry> {
    vif_with(model, VifKind::default())
}

/// VIF table computed with the given [`VifKind`].
pub fn vif_with(model: &FittedOls, kind: VifKind) -> Vec<VifEntry> {
    let values = variance_inflation_factor_with(model.design(), kind);
    model
        .feature_names()
        .iter()
        .zip(values.iter())
        .map(|(name, &vif)| VifEntry {
            variable: name.clone(),
            vif,
        })
        .collect()
}

/// Uncentered Variance Inflation Factor for each predictor.
///
/// For predictor j:
///
/// VIF_j = 1 / (1 - R²_j)
///
/// where R²_j is the uncentered R² from regressing x_j on all other
/// predictors without a constant. `x` must not contain an intercept column.
///
/// # Interpretation
/// - VIF = 1: No correlation with other predictors
/// - VIF > 5: Moderate multicollinearity
/// - VIF > 10: High multicollinearity
///
/// Perfectly collinear predictors get `+inf`. With fewer than two predictors
/// or three observations every VIF is 1.
pub fn variance_inflation_factor(x: &Mat<f64>) -> Col<f64> {
    variance_inflation_factor_with(x, VifKind::Uncentered)
}

/// Variance Inflation Factor for each predictor, centered or not.
pub fn variance_inflation_factor_with(x: &Mat<f64>, kind: VifKind) -> Col<f64> {
    let n = x.nrows();
    let p = x.ncols();

    if n < 3 || p < 2 {
        return Col::from_fn(p, |_| 1.0);
    }

    // Without an intercept the fitted R² is already the uncentered one.
    let auxiliary = OlsRegressor::builder()
        .with_intercept(kind == VifKind::Centered)
        .compute_inference(false)
        .build();

    Col::from_fn(p, |j| {
        let others: Vec<usize> = (0..p).filter(|&k| k != j).collect();
        let x_other = Mat::from_fn(n, p - 1, |i, k| x[(i, others[k])]);
        let y_j = Col::from_fn(n, |i| x[(i, j)]);

        match auxiliary.fit(&x_other, &y_j) {
            Ok(fitted) => {
                let r_squared = fitted.r_squared();
                let vif_j = if r_squared < 1.0 - 1e-14 {
                    1.0 / (1.0 - r_squared)
                } else {
                    f64::INFINITY
                };
                vif_j.max(1.0)
            }
            Err(err) => {
                tracing::debug!(column = j, ?kind, %err, "auxiliary fit failed, VIF set to 1");
                1.0
            }
        }
    })
}

/// Indices of predictors with VIF above `threshold` (commonly 5 or 10).
pub fn high_vif_predictors(vif: &Col<f64>, threshold: f64) -> Vec<usize> {
    vif.iter()
        .enumerate()
        .filter_map(|(i, &v)| (v > threshold).then_some(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vif_orthogonal_predictors() {
        let x = Mat::from_fn(100, 2, |i, j| {
            let t = i as f64 * 0.1;
            if j == 0 {
                t.sin()
            } else {
                t.cos()
            }
        });
        let vif = variance_inflation_factor(&x);
        assert!((vif[0] - 1.0).abs() < 0.5, "VIF[0] = {}", vif[0]);
        assert!((vif[1] - 1.0).abs() < 0.5, "VIF[1] = {}", vif[1]);
    }

    #[test]
    fn test_vif_collinear_predictors() {
        let x = Mat::from_fn(100, 2, |i, j| {
            i as f64 + if j == 1 { 0.01 * (i as f64).sin() } else { 0.0 }
        });
        let vif = variance_inflation_factor(&x);
        assert!(vif[0] > 10.0, "VIF[0] = {}", vif[0]);
        assert!(vif[1] > 10.0, "VIF[1] = {}", vif[1]);
    }

    #[test]
    fn test_vif_minimum_is_one() {
        let x = Mat::from_fn(50, 3, |i, j| ((i + j * 17) as f64).sin());
        let vif = variance_inflation_factor(&x);
        assert!(vif.iter().all(|&v| v >= 1.0));
    }

    #[test]
    fn test_uncentered_vif_for_offset_predictors() {
        // Without a constant, predictors far from the origin look collinear:
        // VIF = 1 / (1 - (Σx1x2)² / (Σx1² Σx2²)).
        let x = Mat::from_fn(4, 2, |i, j| {
            if j == 0 {
                [10.0, 11.0, 12.0, 13.0][i]
            } else {
                [20.0, 19.0, 22.0, 21.0][i]
            }
        });
        let vif = variance_inflation_factor(&x);
        assert!((vif[0] - 900_324.0 / 5_408.0).abs() < 1e-8, "VIF[0] = {}", vif[0]);
        assert!((vif[1] - vif[0]).abs() < 1e-8);

        let centered = variance_inflation_factor_with(&x, VifKind::Centered);
        assert!((centered[0] - 1.5625).abs() < 1e-10, "VIF[0] = {}", centered[0]);
    }

    #[test]
    fn test_single_predictor() {
        let x = Mat::from_fn(10, 1, |i, _| i as f64);
        assert_eq!(variance_inflation_factor(&x)[0], 1.0);
    }

    #[test]
    fn test_high_vif_detection() {
        let x = Mat::from_fn(50, 3, |i, j| match j {
            0 => i as f64,
            1 => (i as f64).sin(),
            _ => i as f64 * 1.01 + 0.5 + 0.05 * (i as f64 * 0.7).cos(),
        });
        let vif = variance_inflation_factor(&x);
        let high = high_vif_predictors(&vif, 5.0);
        assert!(high.contains(&0) && high.contains(&2));
        assert!(!high.contains(&1));
    }

    #[test]
    fn test_vif_table_uses_feature_names() {
        let x = Mat::from_fn(30, 2, |i, j| {
            ((i * (j + 2)) as f64).sin() + j as f64 * i as f64 * 0.05
        });
        let y = Col::from_fn(30, |i| i as f64);
        let model = OlsRegressor::builder()
            .feature_names(["height", "weight"])
            .build()
            .fit(&x, &y)
            .unwrap();

        let table = vif(&model);
        assert_eq!(table.len(), 2);
        assert_eq!(vif_with(&model, VifKind::Uncentered), table);
        assert_eq!(table[0].variable, "height");
        assert_eq!(table[1].variable, "weight");
        assert!(table.iter().all(|e| e.vif >= 1.0));
    }
}

//! Residual diagnostics for a fitted OLS model.

use super::{
    breusch_pagan_with, compute_leverage_with_aliased, cooks_distance, durbin_watson,
    externally_studentized_residuals, influential_cooks, normal_qq, shapiro_wilk, BreuschPagan,
    DiagnosticsError, QqPlot, ShapiroWilk,
};
use crate::solvers::{FittedOls, FittedRegressor};
use crate::utils::population_sd;
use faer::Col;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Residuals against fitted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualsVsFitted {
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
}

/// `sqrt(|e / sd(e)|)` against fitted values, with the population sd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleLocation {
    pub fitted: Vec<f64>,
    pub sqrt_abs_standardized: Vec<f64>,
}

/// Externally studentized residuals against leverage, with Cook's distance
/// for sizing the points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualsVsLeverage {
    pub leverage: Vec<f64>,
    pub studentized: Vec<f64>,
    pub cooks_distance: Vec<f64>,
}

/// The four diagnostic panels and three residual tests of a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionCheck {
    pub residuals_vs_fitted: ResidualsVsFitted,
    /// Residual Q-Q coordinates, standardized by the residual mean and sd.
    pub normal_qq: QqPlot,
    pub scale_location: ScaleLocation,
    pub residuals_vs_leverage: ResidualsVsLeverage,
    pub shapiro_wilk: ShapiroWilk,
    pub breusch_pagan: BreuschPagan,
    pub durbin_watson: f64,
}

impl RegressionCheck {
    /// Observations whose Cook's distance exceeds `4 / n`.
    pub fn influential_points(&self) -> Vec<usize> {
        let cooks = &self.residuals_vs_leverage.cooks_distance;
        influential_cooks(&Col::from_fn(cooks.len(), |i| cooks[i]), None)
    }
}

impl fmt::Display for RegressionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sw = &self.shapiro_wilk;
        let bp = &self.breusch_pagan;
        writeln!(
            f,
            "Shapiro-Wilk test for normality: W = {:.4}, p-value = {:.4}",
            sw.statistic, sw.pvalue
        )?;
        writeln!(
            f,
            "Breusch-Pagan test: LM = {:.4}, p-value = {:.4}, F = {:.4}, p-value = {:.4}",
            bp.lm, bp.lm_pvalue, bp.f_statistic, bp.f_pvalue
        )?;
        write!(f, "Durbin-Watson statistic: {:.4}", self.durbin_watson)
    }
}

/// Diagnostics for a fitted OLS model.
///
/// Needs at least three observations and residuals that are not all equal.
pub fn check_regression(model: &FittedOls) -> Result<RegressionCheck, DiagnosticsError> {
    let result = model.result();
    let residuals: Vec<f64> = model.residuals().iter().copied().collect();
    let fitted: Vec<f64> = model.fitted_values().iter().copied().collect();

    let shapiro = shapiro_wilk(&residuals)?;
    let qq = normal_qq(&residuals, true)?;
    let bp = breusch_pagan_with(model.residuals(), model.design(), model.has_intercept())?;
    let dw = durbin_watson(&residuals);

    let sd = population_sd(&residuals);
    let scale_location = ScaleLocation {
        fitted: fitted.clone(),
        sqrt_abs_standardized: residuals.iter().map(|e| (e / sd).abs().sqrt()).collect(),
    };

    let leverage =
        compute_leverage_with_aliased(model.design(), &result.aliased, model.has_intercept());
    let studentized = externally_studentized_residuals(
        model.residuals(),
        &leverage,
        result.mse,
        result.n_parameters,
    );
    let cooks = cooks_distance(model.residuals(), &leverage, result.mse, result.n_parameters);

    tracing::debug!(
        n = residuals.len(),
        shapiro_p = shapiro.pvalue,
        bp_p = bp.lm_pvalue,
        durbin_watson = dw,
        "regression check complete"
    );

    Ok(RegressionCheck {
        residuals_vs_fitted: ResidualsVsFitted { fitted, residuals },
        normal_qq: qq,
        scale_location,
        residuals_vs_leverage: ResidualsVsLeverage {
            leverage: leverage.iter().copied().collect(),
            studentized: studentized.iter().copied().collect(),
            cooks_distance: cooks.iter().copied().collect(),
        },
        shapiro_wilk: shapiro,
        breusch_pagan: bp,
        durbin_watson: dw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::{OlsRegressor, Regressor};
    use faer::Mat;

    fn noisy_line(n: usize) -> FittedOls {
        let x = Mat::from_fn(n, 1, |i, _| i as f64);
        let y = Col::from_fn(n, |i| 1.0 + 0.5 * i as f64 + ((i * 13) as f64).sin());
        OlsRegressor::builder().build().fit(&x, &y).unwrap()
    }

    #[test]
    fn test_panels_have_one_point_per_observation() {
        let check = check_regression(&noisy_line(25)).unwrap();
        assert_eq!(check.residuals_vs_fitted.residuals.len(), 25);
        assert_eq!(check.normal_qq.len(), 25);
        assert_eq!(check.scale_location.sqrt_abs_standardized.len(), 25);
        assert_eq!(check.residuals_vs_leverage.leverage.len(), 25);
        assert!(check
            .scale_location
            .sqrt_abs_standardized
            .iter()
            .all(|&v| v >= 0.0));
    }

    #[test]
    fn test_leverage_panel_sums_to_parameters() {
        let check = check_regression(&noisy_line(20)).unwrap();
        let total: f64 = check.residuals_vs_leverage.leverage.iter().sum();
        assert!((total - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_text() {
        let check = check_regression(&noisy_line(30)).unwrap();
        let text = check.to_string();
        assert!(text.starts_with("Shapiro-Wilk test for normality: W = "));
        assert!(text.contains("Breusch-Pagan test: LM = "));
        assert!(text.contains("Durbin-Watson statistic: "));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_breusch_pagan_follows_model_intercept() {
        let n = 30;
        let x = Mat::from_fn(n, 2, |i, j| {
            if j == 0 {
                1.0 + i as f64
            } else {
                ((i * 11) as f64).sin()
            }
        });
        let y = Col::from_fn(n, |i| 2.0 * x[(i, 0)] - x[(i, 1)] + ((i * 13) as f64).cos());
        let model = OlsRegressor::builder()
            .with_intercept(false)
            .build()
            .fit(&x, &y)
            .unwrap();

        let check = check_regression(&model).unwrap();
        let expected = breusch_pagan_with(model.residuals(), model.design(), false).unwrap();
        assert_eq!(check.breusch_pagan, expected);
    }

    #[test]
    fn test_too_few_residuals() {
        let x = Mat::from_fn(2, 1, |i, _| i as f64);
        let y = Col::from_fn(2, |i| 1.0 + i as f64);
        let model = OlsRegressor::builder().build().fit(&x, &y).unwrap();
        assert_eq!(
            check_regression(&model),
            Err(DiagnosticsError::InsufficientObservations { needed: 3, got: 2 })
        );
    }
}

//! Regression diagnostics.
//!
//! - **VIF**: variance inflation factors for multicollinearity
//! - **Leverage** and **influence**: hat values and Cook's distance
//! - **Residuals**: standardized and studentized residuals
//! - **Normality**: Shapiro-Wilk test and normal Q-Q coordinates
//! - **Heteroskedasticity**: Breusch-Pagan test
//! - **Autocorrelation**: Durbin-Watson statistic
//!
//! [`check_regression`] bundles the residual panels and tests for a fitted
//! OLS model.
//!
//! # Example
//!
//! ```rust,ignore
//! use regclass::diagnostics::{check_regression, vif};
//!
//! let fitted = OlsRegressor::builder()
//!     .feature_names(["size", "rooms"])
//!     .build()
//!     .fit(&x, &y)?;
//!
//! for entry in vif(&fitted) {
//!     println!("{:>8} {:.2}", entry.variable, entry.vif);
//! }
//! println!("{}", check_regression(&fitted)?);
//! ```

mod autocorrelation;
mod check;
mod heteroskedasticity;
mod influence;
mod leverage;
mod normality;
mod residuals;
mod vif;

pub use autocorrelation::durbin_watson;
pub use check::{
    check_regression, RegressionCheck, ResidualsVsFitted, ResidualsVsLeverage, ScaleLocation,
};
pub use heteroskedasticity::{breusch_pagan, breusch_pagan_with, BreuschPagan};
pub use influence::{cooks_distance, influential_cooks};
pub use leverage::{compute_leverage, compute_leverage_with_aliased, high_leverage_points};
pub use normality::{normal_qq, shapiro_wilk, QqPlot, ShapiroWilk, SHAPIRO_MAX_N};
pub use residuals::{
    externally_studentized_residuals, standardized_residuals, studentized_residuals,
};
pub use vif::{
    high_vif_predictors, variance_inflation_factor, variance_inflation_factor_with, vif, vif_with,
    VifEntry, VifKind,
};

use crate::solvers::RegressionError;
use thiserror::Error;

/// Errors from diagnostic tests.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiagnosticsError {
    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("all values are identical")]
    ConstantData,

    #[error("input contains NaN or infinite values")]
    NonFiniteValue,

    #[error("dimension mismatch: design has {rows} rows but there are {residuals} residuals")]
    DimensionMismatch { rows: usize, residuals: usize },

    #[error("at least one regressor is required")]
    NoRegressors,

    #[error("could not construct the {0} distribution")]
    Distribution(&'static str),

    #[error("auxiliary regression failed: {0}")]
    Regression(#[from] RegressionError),
}

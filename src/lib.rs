//! Statistics helpers for a first course in regression and classification.
//!
//! - [`association`]: one entry point for the association between two columns,
//!   picking Pearson r, Cramér's V, or Pearson on integer-coded labels from
//!   the column types
//! - [`data`]: an in-memory dataset with numeric, categorical and boolean
//!   columns, plus rare-level collapsing for categorical predictors
//! - [`solvers`]: ordinary least squares with coefficient inference
//! - [`diagnostics`]: VIF tables and the regression check (residual panels,
//!   Shapiro-Wilk, Breusch-Pagan, Durbin-Watson)
//!
//! # Example
//!
//! ```rust,ignore
//! use regclass::prelude::*;
//!
//! let df = Dataset::builder()
//!     .numeric("price", prices)
//!     .numeric("size", sizes)
//!     .categorical("city", cities)
//!     .build()?;
//!
//! println!("{}", associate(&df, "price", "city")?);
//!
//! let fitted = OlsRegressor::builder()
//!     .build()
//!     .fit_dataset(&df, "price", &["size"])?;
//! println!("{}", check_regression(&fitted)?);
//! ```

pub mod association;
pub mod core;
pub mod data;
pub mod diagnostics;
pub mod inference;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::association::{
        associate, associate_with, AssociationError, AssociationKind, AssociationResult,
    };
    pub use crate::core::{
        AssociationOptions, RegressionOptions, RegressionOptionsBuilder, RegressionResult,
    };
    pub use crate::data::{
        classify, combine_rare_levels, Column, ColumnKind, DataError, Dataset, MissingPolicy,
        RareLevels,
    };
    pub use crate::diagnostics::{
        breusch_pagan, check_regression, compute_leverage, cooks_distance, durbin_watson,
        normal_qq, shapiro_wilk, variance_inflation_factor, vif, vif_with, DiagnosticsError,
        RegressionCheck, VifEntry, VifKind,
    };
    pub use crate::solvers::{
        FittedOls, FittedRegressor, OlsRegressor, RegressionError, Regressor,
    };
}

pub use crate::association::{associate, associate_with, AssociationResult};
pub use crate::data::{combine_rare_levels, Column, Dataset};
pub use crate::diagnostics::{check_regression, vif};

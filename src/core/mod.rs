//! Core types: fit options, association options and regression results.

mod options;
mod result;

pub use options::{
    AssociationOptions, AssociationOptionsBuilder, OptionsError, RegressionOptions,
    RegressionOptionsBuilder,
};
pub use result::RegressionResult;

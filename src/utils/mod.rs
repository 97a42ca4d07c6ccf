//! Numeric helpers shared by the solvers and diagnostics.

mod matrix;

pub use matrix::{
    center_columns, center_vector, detect_constant_columns, mean, population_sd, with_intercept,
};

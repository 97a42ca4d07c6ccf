//! Association measures between two columns of a dataset.
//!
//! The measure is picked from the kinds of the two columns:
//!
//! - **numeric / numeric**: Pearson r with a two-sided p-value
//! - **categorical / categorical**: Cramér's V from the contingency table
//! - **numeric / categorical**: Pearson r against the integer-coded labels
//!
//! Boolean columns count as categorical.
//!
//! # Example
//!
//! ```
//! use regclass::association::{associate, AssociationKind};
//! use regclass::data::Dataset;
//!
//! let df = Dataset::builder()
//!     .numeric("A", [1.0, 2.0, 3.0, 4.0, 5.0])
//!     .numeric("B", [2.0, 4.0, 6.0, 8.0, 10.0])
//!     .categorical("C", ["X", "X", "Y", "Y", "Y"])
//!     .build()
//!     .unwrap();
//!
//! let ab = associate(&df, "A", "B").unwrap();
//! assert_eq!(ab.kind(), AssociationKind::Numeric);
//! assert!((ab.statistic() - 1.0).abs() < 1e-12);
//!
//! let ac = associate(&df, "A", "C").unwrap();
//! assert_eq!(ac.kind(), AssociationKind::Mixed);
//! ```

mod contingency;
mod encoding;
mod pearson;
mod result;

pub use contingency::{ChiSquaredTest, ContingencyTable};
pub use encoding::CategoryCodes;
pub use pearson::{correlation_pvalue, pearson, PearsonTest};
pub use result::{AssociationKind, AssociationResult};

use crate::core::{AssociationOptions, OptionsError};
use crate::data::{align_pairs, classify, Column, ColumnKind, DataError, Dataset, MissingPolicy};
use thiserror::Error;

/// Errors that can occur while measuring an association.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssociationError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("insufficient observations: need at least {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    #[error("length mismatch: {left} vs {right} values")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

/// Association between two columns of `dataset`, with default options.
///
/// Fails with [`DataError::ColumnNotFound`] when either column is absent.
pub fn associate(
    dataset: &Dataset,
    column_a: &str,
    column_b: &str,
) -> Result<AssociationResult, AssociationError> {
    associate_with(dataset, column_a, column_b, &AssociationOptions::default())
}

/// Association between two columns of `dataset`.
pub fn associate_with(
    dataset: &Dataset,
    column_a: &str,
    column_b: &str,
    options: &AssociationOptions,
) -> Result<AssociationResult, AssociationError> {
    let a = dataset.column(column_a)?;
    let b = dataset.column(column_b)?;
    tracing::debug!(column_a, column_b, "measuring association");
    associate_columns(a, b, options)
}

/// Association between two columns that are not part of a dataset.
pub fn associate_columns(
    a: &Column,
    b: &Column,
    options: &AssociationOptions,
) -> Result<AssociationResult, AssociationError> {
    options.validate()?;

    let kinds = (classify(a), classify(b));
    tracing::trace!(?kinds, "dispatching on column kinds");

    match kinds {
        (ColumnKind::Numeric, ColumnKind::Numeric) => {
            let test = paired_pearson(&numeric_values(a), &numeric_values(b), options)?;
            Ok(AssociationResult::Numeric {
                pearson_r: test.r,
                pvalue: test.pvalue,
            })
        }
        (ColumnKind::Categorical, ColumnKind::Categorical) => Ok(AssociationResult::Categorical {
            cramers_v: cramers_v(a, b, options.yates_correction),
        }),
        (ColumnKind::Numeric, ColumnKind::Categorical) => {
            let codes = CategoryCodes::from_column(b).as_f64();
            let test = paired_pearson(&numeric_values(a), &codes, options)?;
            Ok(AssociationResult::Mixed {
                pearson_r: test.r,
                pvalue: test.pvalue,
            })
        }
        (ColumnKind::Categorical, ColumnKind::Numeric) => {
            let codes = CategoryCodes::from_column(a).as_f64();
            let test = paired_pearson(&codes, &numeric_values(b), options)?;
            Ok(AssociationResult::Mixed {
                pearson_r: test.r,
                pvalue: test.pvalue,
            })
        }
    }
}

/// Cramér's V between two categorical columns, over the rows where both
/// labels are present.
pub fn cramers_v(a: &Column, b: &Column, yates: bool) -> f64 {
    let labels_a: Vec<_> = (0..a.len()).map(|i| a.label(i)).collect();
    let labels_b: Vec<_> = (0..b.len()).map(|i| b.label(i)).collect();
    let aligned = align_pairs(&labels_a, &labels_b, MissingPolicy::Pairwise);

    ContingencyTable::from_pairs(&aligned.left, &aligned.right).cramers_v(yates)
}

fn numeric_values(column: &Column) -> Vec<Option<f64>> {
    (0..column.len()).map(|i| column.value(i)).collect()
}

fn paired_pearson(
    x: &[Option<f64>],
    y: &[Option<f64>],
    options: &AssociationOptions,
) -> Result<PearsonTest, AssociationError> {
    let aligned = align_pairs(x, y, options.missing_policy);
    if aligned.len() < options.min_observations {
        return Err(AssociationError::InsufficientObservations {
            needed: options.min_observations,
            got: aligned.len(),
        });
    }
    pearson(&aligned.left, &aligned.right)
}

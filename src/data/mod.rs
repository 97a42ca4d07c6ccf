//! Tabular data: columns, datasets, missing values and categorical levels.

mod column;
mod dataset;
mod missing;
mod rare_levels;

pub use column::{classify, Column, ColumnKind, Label};
pub use dataset::{DataError, Dataset, DatasetBuilder};
pub use missing::{align_pairs, AlignedPairs, MissingPolicy};
pub use rare_levels::{combine_rare_levels, RareLevels, DEFAULT_NEW_NAME, DEFAULT_THRESHOLD};

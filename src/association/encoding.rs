//! Integer encoding of categorical labels.

use crate::data::{Column, Label};

/// Integer codes for the labels of a categorical column.
///
/// Each distinct label gets its index in the sorted list of distinct labels,
/// so the encoding is stable for a given set of levels. Missing entries have
/// no code.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCodes {
    pub levels: Vec<Label>,
    pub codes: Vec<Option<usize>>,
}

impl CategoryCodes {
    /// Encode a column. Numeric columns have no labels and encode to all `None`.
    pub fn from_column(column: &Column) -> Self {
        let levels = column.levels();
        let codes = (0..column.len())
            .map(|i| {
                column
                    .label(i)
                    .and_then(|label| levels.binary_search(&label).ok())
            })
            .collect();
        Self { levels, codes }
    }

    /// Codes as floating point values, ready for a correlation.
    pub fn as_f64(&self) -> Vec<Option<f64>> {
        self.codes.iter().map(|c| c.map(|c| c as f64)).collect()
    }
}

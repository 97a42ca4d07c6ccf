//! Column storage and type classification.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Statistical kind of a column, used to pick an association measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Continuous values.
    Numeric,
    /// Discrete labels (booleans included).
    Categorical,
}

/// A single column of a [`Dataset`](super::Dataset).
///
/// Missing entries are `None`. For numeric columns a `NaN` value is treated
/// as missing as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// Continuous values.
    Numeric(Vec<Option<f64>>),
    /// Discrete string labels.
    Categorical(Vec<Option<String>>),
    /// Boolean flags. Always classified as categorical.
    Boolean(Vec<Option<bool>>),
}

/// A present value of a categorical column.
///
/// Booleans order `false < true`, and sort before string labels. A single
/// column never mixes the two, so the cross-variant order only has to be total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    Bool(bool),
    Text(String),
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Bool(b) => write!(f, "{b}"),
            Label::Text(s) => f.write_str(s),
        }
    }
}

/// Classify a column before dispatching on it.
///
/// Boolean columns are categorical even though they could be stored as 0/1.
pub fn classify(column: &Column) -> ColumnKind {
    match column {
        Column::Numeric(_) => ColumnKind::Numeric,
        Column::Categorical(_) | Column::Boolean(_) => ColumnKind::Categorical,
    }
}

impl Column {
    /// Build a numeric column without missing values.
    pub fn numeric<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Column::Numeric(values.into_iter().map(Some).collect())
    }

    /// Build a categorical column without missing values.
    pub fn categorical<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Column::Categorical(values.into_iter().map(|s| Some(s.into())).collect())
    }

    /// Build a boolean column without missing values.
    pub fn boolean<I: IntoIterator<Item = bool>>(values: I) -> Self {
        Column::Boolean(values.into_iter().map(Some).collect())
    }

    /// Number of rows, missing entries included.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
            Column::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// See [`classify`].
    pub fn kind(&self) -> ColumnKind {
        classify(self)
    }

    /// Whether row `i` holds a missing value.
    pub fn is_missing(&self, i: usize) -> bool {
        match self {
            Column::Numeric(v) => !matches!(v[i], Some(x) if !x.is_nan()),
            Column::Categorical(v) => v[i].is_none(),
            Column::Boolean(v) => v[i].is_none(),
        }
    }

    /// Number of missing entries.
    pub fn n_missing(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_missing(i)).count()
    }

    /// Numeric value at row `i`, or `None` when missing or not numeric.
    pub fn value(&self, i: usize) -> Option<f64> {
        match self {
            Column::Numeric(v) => v[i].filter(|x| !x.is_nan()),
            _ => None,
        }
    }

    /// Label at row `i`, or `None` when missing or numeric.
    pub fn label(&self, i: usize) -> Option<Label> {
        match self {
            Column::Numeric(_) => None,
            Column::Categorical(v) => v[i].clone().map(Label::Text),
            Column::Boolean(v) => v[i].map(Label::Bool),
        }
    }

    /// Distinct present labels in sorted order. Empty for numeric columns.
    pub fn levels(&self) -> Vec<Label> {
        let set: BTreeSet<Label> = (0..self.len()).filter_map(|i| self.label(i)).collect();
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boolean_as_categorical() {
        assert_eq!(classify(&Column::boolean([true, false])), ColumnKind::Categorical);
        assert_eq!(classify(&Column::categorical(["a"])), ColumnKind::Categorical);
        assert_eq!(classify(&Column::numeric([1.0])), ColumnKind::Numeric);
    }

    #[test]
    fn test_nan_is_missing() {
        let col = Column::Numeric(vec![Some(1.0), Some(f64::NAN), None]);
        assert!(!col.is_missing(0));
        assert!(col.is_missing(1));
        assert!(col.is_missing(2));
        assert_eq!(col.n_missing(), 2);
        assert_eq!(col.value(1), None);
    }

    #[test]
    fn test_levels_sorted() {
        let col = Column::Categorical(vec![
            Some("b".into()),
            None,
            Some("a".into()),
            Some("b".into()),
        ]);
        assert_eq!(
            col.levels(),
            vec![Label::Text("a".into()), Label::Text("b".into())]
        );

        let flags = Column::boolean([true, false, true]);
        assert_eq!(flags.levels(), vec![Label::Bool(false), Label::Bool(true)]);
    }
}

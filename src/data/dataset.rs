//! In-memory tabular dataset.

use super::column::Column;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building or querying a [`Dataset`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("duplicate column name: {name}")]
    DuplicateColumn { name: String },

    #[error("column {name} has {got} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// An immutable collection of named, equally long columns.
///
/// # Example
///
/// ```
/// use regclass::data::{Column, Dataset};
///
/// let df = Dataset::builder()
///     .numeric("age", [23.0, 35.0, 41.0])
///     .categorical("city", ["Oslo", "Lima", "Oslo"])
///     .build()
///     .unwrap();
///
/// assert_eq!(df.n_rows(), 3);
/// assert!(matches!(df.column("age"), Ok(Column::Numeric(_))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset from `(name, column)` pairs, keeping their order.
    pub fn new<S: Into<String>>(columns: Vec<(S, Column)>) -> Result<Self, DataError> {
        let mut dataset = Dataset::default();
        for (name, column) in columns {
            dataset.push(name.into(), column)?;
        }
        Ok(dataset)
    }

    /// Create a builder.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    fn push(&mut self, name: String, column: Column) -> Result<(), DataError> {
        if self.index.contains_key(&name) {
            return Err(DataError::DuplicateColumn { name });
        }
        if self.columns.is_empty() {
            self.n_rows = column.len();
        } else if column.len() != self.n_rows {
            return Err(DataError::LengthMismatch {
                name,
                expected: self.n_rows,
                got: column.len(),
            });
        }
        self.index.insert(name.clone(), self.columns.len());
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, DataError> {
        self.index
            .get(name)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| DataError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Iterate over `(name, column)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }
}

/// Builder for [`Dataset`]. Errors are reported by [`DatasetBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    columns: Vec<(String, Column)>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary column.
    pub fn column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.columns.push((name.into(), column));
        self
    }

    /// Add a numeric column without missing values.
    pub fn numeric<I: IntoIterator<Item = f64>>(self, name: impl Into<String>, values: I) -> Self {
        self.column(name, Column::numeric(values))
    }

    /// Add a categorical column without missing values.
    pub fn categorical<I, S>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column(name, Column::categorical(values))
    }

    /// Add a boolean column without missing values.
    pub fn boolean<I: IntoIterator<Item = bool>>(self, name: impl Into<String>, values: I) -> Self {
        self.column(name, Column::boolean(values))
    }

    /// Validate and build the dataset.
    pub fn build(self) -> Result<Dataset, DataError> {
        Dataset::new(self.columns)
    }
}

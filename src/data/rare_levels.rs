//! Collapsing rare levels of a categorical variable.

use super::column::Column;
use std::collections::HashMap;

/// Default frequency threshold: levels seen at most this many times are rare.
pub const DEFAULT_THRESHOLD: usize = 20;

/// Default label given to the combined rare levels.
pub const DEFAULT_NEW_NAME: &str = "Combined";

/// Replace every level that occurs at most `threshold` times by `new_name`.
///
/// Missing values are counted as a level of their own: when they are rare
/// they are replaced by `new_name` too, otherwise they stay missing.
///
/// # Example
///
/// ```
/// use regclass::data::combine_rare_levels;
///
/// let f = [Some("A"), Some("A"), Some("B"), Some("C")];
/// let combined = combine_rare_levels(&f, 1, "Rare");
///
/// let labels: Vec<&str> = combined.iter().map(|v| v.as_deref().unwrap()).collect();
/// assert_eq!(labels, ["A", "A", "Rare", "Rare"]);
/// ```
pub fn combine_rare_levels<S: AsRef<str>>(
    values: &[Option<S>],
    threshold: usize,
    new_name: &str,
) -> Vec<Option<String>> {
    let mut counts: HashMap<Option<&str>, usize> = HashMap::new();
    for v in values {
        let key: Option<&str> = v.as_ref().map(|s| s.as_ref());
        *counts.entry(key).or_default() += 1;
    }

    let n_rare = counts.values().filter(|&&c| c <= threshold).count();
    tracing::debug!(
        n_levels = counts.len(),
        n_rare,
        threshold,
        "combining rare levels"
    );

    values
        .iter()
        .map(|v| {
            let key: Option<&str> = v.as_ref().map(|s| s.as_ref());
            if counts[&key] <= threshold {
                Some(new_name.to_string())
            } else {
                key.map(str::to_string)
            }
        })
        .collect()
}

/// Configurable rare-level collapsing.
///
/// ```
/// use regclass::data::RareLevels;
///
/// let collapse = RareLevels::new().threshold(2).new_name("Other");
/// let out = collapse.apply(&[Some("x"), Some("y"), Some("y"), Some("y")]);
/// assert_eq!(out[0].as_deref(), Some("Other"));
/// assert_eq!(out[1].as_deref(), Some("y"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RareLevels {
    threshold: usize,
    new_name: String,
}

impl Default for RareLevels {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            new_name: DEFAULT_NEW_NAME.to_string(),
        }
    }
}

impl RareLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frequency threshold (inclusive).
    pub fn threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the label for combined levels.
    pub fn new_name(mut self, name: impl Into<String>) -> Self {
        self.new_name = name.into();
        self
    }

    /// Apply to a slice of optional labels.
    pub fn apply<S: AsRef<str>>(&self, values: &[Option<S>]) -> Vec<Option<String>> {
        combine_rare_levels(values, self.threshold, &self.new_name)
    }

    /// Apply to a column. The result is always categorical; numeric and
    /// boolean values are turned into their textual form first.
    pub fn apply_column(&self, column: &Column) -> Column {
        let labels: Vec<Option<String>> = match column {
            Column::Numeric(v) => v
                .iter()
                .map(|x| x.filter(|x| !x.is_nan()).map(|x| x.to_string()))
                .collect(),
            Column::Categorical(v) => v.clone(),
            Column::Boolean(v) => v.iter().map(|b| b.map(|b| b.to_string())).collect(),
        };
        Column::Categorical(self.apply(&labels))
    }
}

impl Column {
    /// Shorthand for [`RareLevels::apply_column`].
    pub fn combine_rare_levels(&self, threshold: usize, new_name: &str) -> Column {
        RareLevels::new()
            .threshold(threshold)
            .new_name(new_name)
            .apply_column(self)
    }
}

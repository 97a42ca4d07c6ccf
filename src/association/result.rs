//! Association results and their key-value form.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Which measure produced an [`AssociationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociationKind {
    /// Both columns numeric: Pearson r.
    Numeric,
    /// Both columns categorical: Cramér's V.
    Categorical,
    /// One of each: Pearson r against integer-coded labels.
    Mixed,
}

impl AssociationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssociationKind::Numeric => "numeric",
            AssociationKind::Categorical => "categorical",
            AssociationKind::Mixed => "mixed",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Association between two columns.
///
/// Serializes to `{"type": ..., "pearson_r" | "cramers_v": ..., "pvalue": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssociationResult {
    Numeric { pearson_r: f64, pvalue: f64 },
    Categorical { cramers_v: f64 },
    Mixed { pearson_r: f64, pvalue: f64 },
}

impl AssociationResult {
    pub fn kind(&self) -> AssociationKind {
        match self {
            AssociationResult::Numeric { .. } => AssociationKind::Numeric,
            AssociationResult::Categorical { .. } => AssociationKind::Categorical,
            AssociationResult::Mixed { .. } => AssociationKind::Mixed,
        }
    }

    /// The primary statistic: Pearson r or Cramér's V.
    pub fn statistic(&self) -> f64 {
        match *self {
            AssociationResult::Numeric { pearson_r, .. }
            | AssociationResult::Mixed { pearson_r, .. } => pearson_r,
            AssociationResult::Categorical { cramers_v } => cramers_v,
        }
    }

    /// Pearson r, when the result carries one.
    pub fn pearson_r(&self) -> Option<f64> {
        match *self {
            AssociationResult::Numeric { pearson_r, .. }
            | AssociationResult::Mixed { pearson_r, .. } => Some(pearson_r),
            AssociationResult::Categorical { .. } => None,
        }
    }

    /// Cramér's V, when the result carries one.
    pub fn cramers_v(&self) -> Option<f64> {
        match *self {
            AssociationResult::Categorical { cramers_v } => Some(cramers_v),
            _ => None,
        }
    }

    /// Two-sided p-value. Categorical results have none.
    pub fn pvalue(&self) -> Option<f64> {
        match *self {
            AssociationResult::Numeric { pvalue, .. } | AssociationResult::Mixed { pvalue, .. } => {
                Some(pvalue)
            }
            AssociationResult::Categorical { .. } => None,
        }
    }

    /// Key-value form. Non-finite numbers become `null`.
    pub fn to_json(&self) -> Value {
        match *self {
            AssociationResult::Categorical { cramers_v } => json!({
                "type": "categorical",
                "cramers_v": cramers_v,
            }),
            AssociationResult::Numeric { pearson_r, pvalue }
            | AssociationResult::Mixed { pearson_r, pvalue } => json!({
                "type": self.kind().as_str(),
                "pearson_r": pearson_r,
                "pvalue": pvalue,
            }),
        }
    }
}

impl fmt::Display for AssociationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AssociationResult::Categorical { cramers_v } => {
                write!(f, "categorical: cramers_v = {cramers_v:.4}")
            }
            AssociationResult::Numeric { pearson_r, pvalue }
            | AssociationResult::Mixed { pearson_r, pvalue } => write!(
                f,
                "{}: pearson_r = {pearson_r:.4}, pvalue = {pvalue:.4}",
                self.kind()
            ),
        }
    }
}

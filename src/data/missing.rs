//! Missing value alignment for paired columns.
//!
//! Two policies are available when two columns are paired up for an
//! association measure:
//! - `Pairwise`: drop every row where either value is missing
//! - `IndependentTruncate`: drop missing values from each column on its own,
//!   then pair the cleaned sequences positionally up to the shorter length
//!
//! `IndependentTruncate` can pair values that came from different rows when
//! the two columns have different missingness patterns.
//!
//! # Example
//!
//! ```
//! use regclass::data::{align_pairs, MissingPolicy};
//!
//! let a = [Some(1.0), None, Some(3.0), Some(4.0)];
//! let b = [Some(10.0), Some(20.0), None, Some(40.0)];
//!
//! let pairwise = align_pairs(&a, &b, MissingPolicy::Pairwise);
//! assert_eq!(pairwise.left, vec![1.0, 4.0]);
//! assert_eq!(pairwise.right, vec![10.0, 40.0]);
//!
//! let truncated = align_pairs(&a, &b, MissingPolicy::IndependentTruncate);
//! assert_eq!(truncated.left, vec![1.0, 3.0, 4.0]);
//! assert_eq!(truncated.right, vec![10.0, 20.0, 40.0]);
//! ```

use serde::{Deserialize, Serialize};

/// How rows with missing values are removed before two columns are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Keep only rows where both values are present.
    #[default]
    Pairwise,

    /// Drop missing values per column, then pair positionally up to the
    /// shorter of the two cleaned sequences.
    ///
    /// A missing categorical label has no integer code, so in a mixed pair it
    /// is dropped like a missing number. It is never encoded as a sentinel
    /// level such as `-1`.
    IndependentTruncate,
}

/// Two equally long sequences produced by [`align_pairs`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPairs<A, B> {
    pub left: Vec<A>,
    pub right: Vec<B>,
    /// Number of rows before alignment.
    pub n_original: usize,
}

impl<A, B> AlignedPairs<A, B> {
    /// Number of aligned pairs.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Rows that did not make it into a pair.
    pub fn n_removed(&self) -> usize {
        self.n_original.saturating_sub(self.len())
    }
}

/// Align two columns of optional values according to `policy`.
///
/// With `Pairwise` the inputs are expected to have the same length; extra
/// trailing rows of the longer input are ignored.
pub fn align_pairs<A: Clone, B: Clone>(
    a: &[Option<A>],
    b: &[Option<B>],
    policy: MissingPolicy,
) -> AlignedPairs<A, B> {
    let n_original = a.len().max(b.len());

    let (left, right): (Vec<A>, Vec<B>) = match policy {
        MissingPolicy::Pairwise => a
            .iter()
            .zip(b.iter())
            .filter_map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) => Some((x.clone(), y.clone())),
                _ => None,
            })
            .unzip(),
        MissingPolicy::IndependentTruncate => a
            .iter()
            .flatten()
            .cloned()
            .zip(b.iter().flatten().cloned())
            .unzip(),
    };

    if left.len() < n_original {
        tracing::trace!(
            ?policy,
            kept = left.len(),
            dropped = n_original - left.len(),
            "aligned paired columns"
        );
    }

    AlignedPairs {
        left,
        right,
        n_original,
    }
}

//! Contingency tables, the chi-squared test of independence and Cramér's V.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::collections::BTreeSet;

/// Chi-squared test of independence on a contingency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChiSquaredTest {
    pub statistic: f64,
    /// Degrees of freedom, (rows - 1) * (cols - 1).
    pub dof: usize,
    pub pvalue: f64,
}

/// Cross-tabulation of co-occurrence counts between two label sequences.
///
/// Rows follow the sorted distinct labels of the first sequence, columns the
/// sorted distinct labels of the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable<L> {
    row_labels: Vec<L>,
    col_labels: Vec<L>,
    /// Row-major counts.
    counts: Vec<usize>,
}

impl<L: Ord + Clone> ContingencyTable<L> {
    /// Cross-tabulate two equally long label sequences.
    ///
    /// Extra trailing labels of the longer sequence are ignored.
    pub fn from_pairs(rows: &[L], cols: &[L]) -> Self {
        let n = rows.len().min(cols.len());
        let row_labels: Vec<L> = rows[..n]
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let col_labels: Vec<L> = cols[..n]
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let k = col_labels.len();
        let mut counts = vec![0; row_labels.len() * k];
        for (a, b) in rows[..n].iter().zip(&cols[..n]) {
            // Both labels come from the sets built above.
            if let (Ok(i), Ok(j)) = (row_labels.binary_search(a), col_labels.binary_search(b)) {
                counts[i * k + j] += 1;
            }
        }

        Self {
            row_labels,
            col_labels,
            counts,
        }
    }
}

impl<L> ContingencyTable<L> {
    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.col_labels.len())
    }

    pub fn row_labels(&self) -> &[L] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[L] {
        &self.col_labels
    }

    /// Count at (row, column).
    pub fn count(&self, i: usize, j: usize) -> usize {
        self.counts[i * self.col_labels.len() + j]
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn row_totals(&self) -> Vec<usize> {
        let k = self.col_labels.len();
        (0..self.row_labels.len())
            .map(|i| self.counts[i * k..(i + 1) * k].iter().sum())
            .collect()
    }

    pub fn col_totals(&self) -> Vec<usize> {
        let (r, k) = self.shape();
        (0..k)
            .map(|j| (0..r).map(|i| self.counts[i * k + j]).sum())
            .collect()
    }

    /// Expected counts under independence, row-major.
    pub fn expected(&self) -> Vec<f64> {
        let n = self.total() as f64;
        let rows = self.row_totals();
        let cols = self.col_totals();
        rows.iter()
            .flat_map(|&ri| cols.iter().map(move |&cj| ri as f64 * cj as f64 / n))
            .collect()
    }

    /// Degrees of freedom of the independence test.
    pub fn dof(&self) -> usize {
        let (r, k) = self.shape();
        r.saturating_sub(1) * k.saturating_sub(1)
    }

    /// Pearson's chi-squared test of independence.
    ///
    /// With `yates` set and a single degree of freedom, each observed count
    /// is moved toward its expected count by at most 0.5 first. A table with
    /// zero degrees of freedom has statistic 0 and p-value 1.
    pub fn chi_squared(&self, yates: bool) -> ChiSquaredTest {
        let dof = self.dof();
        if dof == 0 {
            return ChiSquaredTest {
                statistic: 0.0,
                dof,
                pvalue: 1.0,
            };
        }

        let expected = self.expected();
        let statistic = self
            .counts
            .iter()
            .zip(&expected)
            .map(|(&o, &e)| {
                let mut o = o as f64;
                if yates && dof == 1 {
                    let diff = e - o;
                    o += diff.signum() * diff.abs().min(0.5);
                }
                (o - e).powi(2) / e
            })
            .sum::<f64>();

        let pvalue = ChiSquared::new(dof as f64).map_or(f64::NAN, |d| d.sf(statistic));

        ChiSquaredTest {
            statistic,
            dof,
            pvalue,
        }
    }

    /// Cramér's V, in [0, 1].
    ///
    /// V = sqrt(chi² / n / min(r - 1, k - 1)). A table with a single row or
    /// column has no association and yields exactly 0.
    pub fn cramers_v(&self, yates: bool) -> f64 {
        let (r, k) = self.shape();
        let min_dim = r.min(k).saturating_sub(1);
        if min_dim == 0 {
            tracing::debug!(rows = r, cols = k, "degenerate contingency table");
            return 0.0;
        }

        let chi2 = self.chi_squared(yates).statistic;
        let phi2 = chi2 / self.total() as f64;
        (phi2 / min_dim as f64).sqrt().min(1.0)
    }
}

//! Leverage: diagonal of the hat matrix `H = X (X'X)^(-1) X'`.

use crate::utils::with_intercept;
use faer::{Col, Mat};

/// Leverage of each observation.
///
/// Computed from the QR factorization `X = QR` as the squared row norms of the
/// first `p` columns of `Q`, so `X'X` is never inverted explicitly.
///
/// # Properties
/// - h_ii ∈ [0, 1]
/// - Σ h_ii = p (number of parameters)
/// - Points with h_ii > 2p/n are considered high leverage
pub fn compute_leverage(x: &Mat<f64>, with_intercept: bool) -> Col<f64> {
    compute_leverage_with_aliased(x, &vec![false; x.ncols()], with_intercept)
}

/// Leverage using only the non-aliased columns of `x`.
///
/// NaN for every observation when no columns remain or the reduced design is
/// still rank deficient.
pub fn compute_leverage_with_aliased(
    x: &Mat<f64>,
    aliased: &[bool],
    intercept: bool,
) -> Col<f64> {
    let n = x.nrows();
    let kept: Vec<usize> = (0..x.ncols()).filter(|&j| !aliased[j]).collect();
    let reduced = Mat::from_fn(n, kept.len(), |i, k| x[(i, kept[k])]);
    let design = if intercept {
        with_intercept(&reduced)
    } else {
        reduced
    };

    let p = design.ncols();
    if p == 0 || p > n {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let qr = design.qr();
    let r = qr.R();
    let scale = (0..p).map(|k| r[(k, k)].abs()).fold(0.0, f64::max);
    if (0..p).any(|k| r[(k, k)].abs() <= 1e-10 * scale.max(1.0)) {
        tracing::debug!(p, "design is rank deficient, leverage undefined");
        return Col::from_fn(n, |_| f64::NAN);
    }

    let q = qr.compute_Q();
    Col::from_fn(n, |i| {
        let h: f64 = (0..p).map(|k| q[(i, k)] * q[(i, k)]).sum();
        h.clamp(0.0, 1.0)
    })
}

/// Indices of observations whose leverage exceeds `threshold`
/// (default `2p / n`).
pub fn high_leverage_points(
    leverage: &Col<f64>,
    n_params: usize,
    threshold: Option<f64>,
) -> Vec<usize> {
    let cutoff = threshold.unwrap_or(2.0 * n_params as f64 / leverage.nrows() as f64);
    leverage
        .iter()
        .enumerate()
        .filter_map(|(i, &h)| (h > cutoff).then_some(i))
        .collect()
}

//! Cook's distance.

use faer::Col;

/// Cook's distance for each observation.
///
/// D_i = (e_i² / (p * MSE)) * (h_ii / (1 - h_ii)²)
pub fn cooks_distance(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
) -> Col<f64> {
    let n = residuals.nrows();
    if n_params == 0 || !(mse.is_finite() && mse > 0.0) {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let p = n_params as f64;
    Col::from_fn(n, |i| {
        let h = leverage[i];
        let one_minus_h = (1.0 - h).max(1e-14);
        let d = residuals[i].powi(2) / (p * mse) * h / one_minus_h.powi(2);
        if d.is_finite() {
            d.max(0.0)
        } else {
            f64::NAN
        }
    })
}

/// Indices with Cook's distance above `threshold` (default `4 / n`).
pub fn influential_cooks(cooks_d: &Col<f64>, threshold: Option<f64>) -> Vec<usize> {
    let cutoff = threshold.unwrap_or(4.0 / cooks_d.nrows() as f64);
    cooks_d
        .iter()
        .enumerate()
        .filter_map(|(i, &d)| (d > cutoff).then_some(i))
        .collect()
}

//! Durbin-Watson statistic for first-order residual autocorrelation.

/// `Σ (e_t - e_{t-1})² / Σ e_t²`, in `[0, 4]`.
///
/// Values near 2 indicate no first-order autocorrelation, values toward 0
/// positive and toward 4 negative autocorrelation. NaN for fewer than two
/// residuals or an all-zero residual vector.
pub fn durbin_watson(residuals: &[f64]) -> f64 {
    if residuals.len() < 2 {
        return f64::NAN;
    }

    let num: f64 = residuals.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
    let denom: f64 = residuals.iter().map(|e| e * e).sum();
    if denom > 0.0 {
        num / denom
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_alternating_signs() {
        // diffs are all ±2, so 4(n-1)/n
        let e = [1.0, -1.0, 1.0, -1.0, 1.0];
        assert_relative_eq!(durbin_watson(&e), 16.0 / 5.0);
    }

    #[test]
    fn test_constant_residuals() {
        assert_eq!(durbin_watson(&[0.5, 0.5, 0.5]), 0.0);
    }

    #[test]
    fn test_bounds() {
        let e: Vec<f64> = (0..30).map(|i| ((i * 7) as f64).sin()).collect();
        let d = durbin_watson(&e);
        assert!((0.0..=4.0).contains(&d));
    }

    #[test]
    fn test_degenerate() {
        assert!(durbin_watson(&[1.0]).is_nan());
        assert!(durbin_watson(&[0.0, 0.0]).is_nan());
    }
}

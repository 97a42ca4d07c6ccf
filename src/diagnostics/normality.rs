//! Normality checks: Shapiro-Wilk test and normal Q-Q coordinates.

use super::DiagnosticsError;
use crate::utils::{mean, population_sd};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

/// Result of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapiroWilk {
    /// W statistic in (0, 1]. Values near 1 are consistent with normality.
    pub statistic: f64,
    pub pvalue: f64,
}

/// Largest sample for which the p-value approximation is calibrated.
pub const SHAPIRO_MAX_N: usize = 5000;

// Polynomial coefficients of Royston's (1995) approximation, algorithm AS R94.
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const SMALL_MEAN: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const SMALL_SD: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const LARGE_MEAN: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const LARGE_SD: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const SMALL_GAMMA: [f64; 2] = [-2.273, 0.459];

/// `c[0] + c[1] x + c[2] x² + ...`
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

fn std_normal() -> Result<Normal, DiagnosticsError> {
    Normal::new(0.0, 1.0).map_err(|_| DiagnosticsError::Distribution("standard normal"))
}

/// Shapiro-Wilk test of the null hypothesis that `sample` was drawn from a
/// normal distribution.
///
/// Requires at least three finite values that are not all equal. Samples
/// larger than [`SHAPIRO_MAX_N`] are accepted but the p-value may be
/// inaccurate.
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroWilk, DiagnosticsError> {
    let n = sample.len();
    if n < 3 {
        return Err(DiagnosticsError::InsufficientObservations { needed: 3, got: n });
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(DiagnosticsError::NonFiniteValue);
    }
    if n > SHAPIRO_MAX_N {
        tracing::warn!(
            n,
            max = SHAPIRO_MAX_N,
            "Shapiro-Wilk p-value may be inaccurate for large samples"
        );
    }

    let mut x = sample.to_vec();
    x.sort_by(f64::total_cmp);

    let x_bar = mean(&x);
    let ss: f64 = x.iter().map(|&v| (v - x_bar).powi(2)).sum();
    if ss <= 0.0 || x[n - 1] - x[0] < 1e-19 {
        return Err(DiagnosticsError::ConstantData);
    }

    let a = shapiro_coefficients(n)?;
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, &ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();
    let w = (numerator * numerator / ss).min(1.0);

    let pvalue = shapiro_pvalue(w, n)?;
    Ok(ShapiroWilk {
        statistic: w,
        pvalue,
    })
}

/// The `n / 2` leading coefficients `a_1 >= a_2 >= ...`; the rest follow by
/// antisymmetry. Normalized so the full vector has unit length.
fn shapiro_coefficients(n: usize) -> Result<Vec<f64>, DiagnosticsError> {
    let half = n / 2;
    if n == 3 {
        return Ok(vec![0.5f64.sqrt()]);
    }

    let normal = std_normal()?;
    let an = n as f64;
    // Expected normal order statistics for the lower half (all negative).
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; half];
    a[0] = a1;

    let (first_plain, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    for i in first_plain..half {
        a[i] = -m[i] / fac;
    }
    Ok(a)
}

fn shapiro_pvalue(w: f64, n: usize) -> Result<f64, DiagnosticsError> {
    if n == 3 {
        let p = 6.0 / PI * (w.sqrt().asin() - PI / 3.0);
        return Ok(p.clamp(0.0, 1.0));
    }

    let an = n as f64;
    let mut y = (1.0 - w).ln();
    let (m, s) = if n <= 11 {
        let gamma = poly(&SMALL_GAMMA, an);
        if y >= gamma {
            return Ok(1e-99);
        }
        y = -(gamma - y).ln();
        (poly(&SMALL_MEAN, an), poly(&SMALL_SD, an).exp())
    } else {
        let ln_n = an.ln();
        (poly(&LARGE_MEAN, ln_n), poly(&LARGE_SD, ln_n).exp())
    };

    Ok(std_normal()?.sf((y - m) / s))
}

/// Coordinates of a normal Q-Q plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QqPlot {
    /// Standard normal quantiles at plotting positions `i / (n + 1)`.
    pub theoretical: Vec<f64>,
    /// Sorted sample, standardized when fitted.
    pub sample: Vec<f64>,
    /// Location and scale used to standardize the sample (`0` and `1` when
    /// not fitted).
    pub loc: f64,
    pub scale: f64,
}

impl QqPlot {
    pub fn len(&self) -> usize {
        self.sample.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }

    /// Points as `(theoretical, sample)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.theoretical.iter().copied().zip(self.sample.iter().copied())
    }

    /// Correlation between theoretical and sample quantiles.
    pub fn correlation(&self) -> f64 {
        let mx = mean(&self.theoretical);
        let my = mean(&self.sample);
        let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
        for (t, s) in self.points() {
            sxy += (t - mx) * (s - my);
            sxx += (t - mx).powi(2);
            syy += (s - my).powi(2);
        }
        sxy / (sxx * syy).sqrt()
    }
}

/// Normal Q-Q coordinates for `sample`.
///
/// With `fit`, the sample is standardized by its mean and population standard
/// deviation so the reference line is the 45° diagonal.
pub fn normal_qq(sample: &[f64], fit: bool) -> Result<QqPlot, DiagnosticsError> {
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(DiagnosticsError::NonFiniteValue);
    }

    let n = sample.len();
    let normal = std_normal()?;
    let theoretical = (1..=n)
        .map(|i| normal.inverse_cdf(i as f64 / (n as f64 + 1.0)))
        .collect();

    let (loc, scale) = if fit && n > 0 {
        let sd = population_sd(sample);
        if sd <= 0.0 {
            return Err(DiagnosticsError::ConstantData);
        }
        (mean(sample), sd)
    } else {
        (0.0, 1.0)
    };

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    let sample = sorted.into_iter().map(|v| (v - loc) / scale).collect();

    Ok(QqPlot {
        theoretical,
        sample,
        loc,
        scale,
    })
}

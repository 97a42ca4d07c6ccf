//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use faer::{Col, Mat};
use regclass::data::{Column, Dataset};

/// Installs a test-writer subscriber so `tracing` output shows up with
/// `--nocapture`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic values in [-1, 1) from a linear congruential generator.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 32) as f64) / 4294967296.0 * 2.0 - 1.0
    }
}

/// `y = intercept + Σ (j + 1) x_j + noise` with uniform predictors.
pub fn linear_data(
    n_samples: usize,
    n_features: usize,
    intercept: f64,
    noise: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>) {
    let mut rng = Lcg::new(seed);
    let mut x = Mat::zeros(n_samples, n_features);
    let mut y = Col::zeros(n_samples);
    for i in 0..n_samples {
        let mut yi = intercept;
        for j in 0..n_features {
            x[(i, j)] = rng.next_f64();
            yi += (j + 1) as f64 * x[(i, j)];
        }
        y[i] = yi + noise * rng.next_f64();
    }
    (x, y)
}

/// The four-column example frame: two proportional numeric columns and two
/// perfectly associated categorical columns.
pub fn example_frame() -> Dataset {
    Dataset::builder()
        .numeric("A", [1.0, 2.0, 3.0, 4.0])
        .numeric("B", [2.0, 4.0, 6.0, 8.0])
        .categorical("C", ["X", "X", "Y", "Y"])
        .categorical("D", ["P", "P", "Q", "Q"])
        .build()
        .expect("valid frame")
}

/// A numeric column with missing entries.
pub fn numeric_with_gaps(values: &[Option<f64>]) -> Column {
    Column::Numeric(values.to_vec())
}

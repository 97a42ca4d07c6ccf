//! Column-wise matrix and vector helpers.

use faer::{Col, Mat};

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with divisor `n`.
pub fn population_sd(values: &[f64]) -> f64 {
    let m = mean(values);
    let ss: f64 = values.iter().map(|&v| (v - m).powi(2)).sum();
    (ss / values.len() as f64).sqrt()
}

/// Flags columns whose values all lie within `tolerance` of the first row.
///
/// Every column of a matrix with no rows counts as constant.
pub fn detect_constant_columns(x: &Mat<f64>, tolerance: f64) -> Vec<bool> {
    (0..x.ncols())
        .map(|j| {
            x.nrows() == 0 || {
                let first = x[(0, j)];
                (1..x.nrows()).all(|i| (x[(i, j)] - first).abs() < tolerance)
            }
        })
        .collect()
}

/// Subtract column means. Returns the centered matrix and the means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n = x.nrows() as f64;
    let means = Col::from_fn(x.ncols(), |j| (0..x.nrows()).map(|i| x[(i, j)]).sum::<f64>() / n);
    let centered = Mat::from_fn(x.nrows(), x.ncols(), |i, j| x[(i, j)] - means[j]);
    (centered, means)
}

/// Subtract the mean of `y`. Returns the centered vector and the mean.
pub fn center_vector(y: &Col<f64>) -> (Col<f64>, f64) {
    let m = y.iter().sum::<f64>() / y.nrows() as f64;
    (Col::from_fn(y.nrows(), |i| y[i] - m), m)
}

/// `[1 | x]`: prepends a column of ones.
pub fn with_intercept(x: &Mat<f64>) -> Mat<f64> {
    Mat::from_fn(x.nrows(), x.ncols() + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            x[(i, j - 1)]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_columns() {
        let x = Mat::from_fn(5, 3, |i, j| if j == 1 { i as f64 } else { j as f64 });
        assert_eq!(detect_constant_columns(&x, 1e-10), vec![true, false, true]);
    }

    #[test]
    fn test_constant_columns_respect_tolerance() {
        let x = Mat::from_fn(3, 1, |i, _| if i == 1 { 1.000001 } else { 1.0 });
        assert!(!detect_constant_columns(&x, 1e-10)[0]);
        assert!(detect_constant_columns(&x, 1e-5)[0]);
    }

    #[test]
    fn test_no_rows_means_constant() {
        let x = Mat::<f64>::zeros(0, 2);
        assert_eq!(detect_constant_columns(&x, 1e-10), vec![true, true]);
    }

    #[test]
    fn test_centering() {
        let x = Mat::from_fn(4, 2, |i, j| (i + 1) as f64 * if j == 0 { 1.0 } else { 10.0 });
        let (centered, means) = center_columns(&x);
        assert!((means[0] - 2.5).abs() < 1e-12);
        assert!((means[1] - 25.0).abs() < 1e-12);
        for j in 0..2 {
            let total: f64 = (0..4).map(|i| centered[(i, j)]).sum();
            assert!(total.abs() < 1e-12);
        }

        let (cy, my) = center_vector(&Col::from_fn(4, |i| (i + 1) as f64));
        assert!((my - 2.5).abs() < 1e-12);
        assert!(cy.iter().sum::<f64>().abs() < 1e-12);
    }

    #[test]
    fn test_moments() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        assert!((population_sd(&v) - 2.0).abs() < 1e-12);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_with_intercept() {
        let x = Mat::from_fn(2, 1, |i, _| i as f64 + 3.0);
        let a = with_intercept(&x);
        assert_eq!(a.ncols(), 2);
        assert_eq!(a[(1, 0)], 1.0);
        assert_eq!(a[(1, 1)], 4.0);
    }
}

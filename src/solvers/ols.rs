//! Ordinary Least Squares regression solver.

use crate::core::{RegressionOptions, RegressionOptionsBuilder, RegressionResult};
use crate::data::{Column, Dataset};
use crate::inference::{two_sided_p, CoefficientInference};
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{center_columns, center_vector, detect_constant_columns};
use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

/// Ordinary Least Squares regression estimator.
///
/// Uses QR decomposition with column pivoting to handle rank-deficient matrices.
/// Aliased (collinear) coefficients are set to NaN.
///
/// # Example
///
/// ```rust,ignore
/// use regclass::solvers::{OlsRegressor, Regressor, FittedRegressor};
/// use faer::{Mat, Col};
///
/// let x = Mat::from_fn(100, 2, |i, j| (i + j) as f64);
/// let y = Col::from_fn(100, |i| 1.0 + 2.0 * i as f64);
///
/// let fitted = OlsRegressor::builder()
///     .with_intercept(true)
///     .feature_names(["size", "age"])
///     .build()
///     .fit(&x, &y)?;
///
/// println!("R² = {}", fitted.r_squared());
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    options: RegressionOptions,
    feature_names: Option<Vec<String>>,
}

impl OlsRegressor {
    /// Create a new OLS regressor with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self {
            options,
            feature_names: None,
        }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    /// Fit `response ~ predictors` from numeric columns of a dataset.
    ///
    /// Rows with a missing value in any of the involved columns are dropped.
    /// Predictor names become the feature names of the fitted model.
    pub fn fit_dataset(
        &self,
        dataset: &Dataset,
        response: &str,
        predictors: &[&str],
    ) -> Result<FittedOls, RegressionError> {
        let y_col = numeric_column(dataset, response)?;
        let x_cols = predictors
            .iter()
            .map(|name| numeric_column(dataset, name))
            .collect::<Result<Vec<_>, _>>()?;

        let kept: Vec<usize> = (0..dataset.n_rows())
            .filter(|&i| !y_col.is_missing(i) && x_cols.iter().all(|c| !c.is_missing(i)))
            .collect();
        if kept.len() < dataset.n_rows() {
            tracing::debug!(
                dropped = dataset.n_rows() - kept.len(),
                "omitting rows with missing values"
            );
        }

        let value = |col: &Column, i: usize| col.value(i).unwrap_or(f64::NAN);
        let x = Mat::from_fn(kept.len(), x_cols.len(), |i, j| value(x_cols[j], kept[i]));
        let y = Col::from_fn(kept.len(), |i| value(y_col, kept[i]));

        let regressor = Self {
            options: self.options.clone(),
            feature_names: Some(predictors.iter().map(|s| s.to_string()).collect()),
        };
        regressor.fit(&x, &y)
    }
}

fn numeric_column<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column, RegressionError> {
    let column = dataset.column(name)?;
    match column {
        Column::Numeric(_) => Ok(column),
        _ => Err(RegressionError::NonNumericColumn {
            name: name.to_string(),
        }),
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        self.options.validate()?;

        let n_samples = x.nrows();
        let n_features = x.ncols();

        if x.nrows() != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.nrows(),
            });
        }

        let feature_names = match &self.feature_names {
            Some(names) if names.len() != n_features => {
                return Err(RegressionError::FeatureNames {
                    expected: n_features,
                    got: names.len(),
                })
            }
            Some(names) => names.clone(),
            None => (1..=n_features).map(|j| format!("x{j}")).collect(),
        };

        if n_samples < 2 {
            return Err(RegressionError::InsufficientObservations {
                needed: 2,
                got: n_samples,
            });
        }

        // Allow an exact fit (n_params = n_samples).
        let n_params = if self.options.with_intercept {
            n_features + 1
        } else {
            n_features
        };

        if n_samples < n_params {
            return Err(RegressionError::InsufficientObservations {
                needed: n_params,
                got: n_samples,
            });
        }

        let constant_cols = detect_constant_columns(x, self.options.rank_tolerance);

        let (coefficients, intercept, aliased, rank) = if self.options.with_intercept {
            let (x_centered, x_means) = center_columns(x);
            let (y_centered, y_mean) = center_vector(y);

            let (coefficients, aliased, rank) =
                self.solve_with_qr(&x_centered, &y_centered, &constant_cols);

            // intercept = y_mean - x_means' * coefficients
            let mut intercept = y_mean;
            for j in 0..n_features {
                if !aliased[j] {
                    intercept -= x_means[j] * coefficients[j];
                }
            }
            (coefficients, Some(intercept), aliased, rank)
        } else {
            if constant_cols.iter().all(|&c| c) {
                return Err(RegressionError::AllFeaturesConstant);
            }
            let (coefficients, aliased, rank) = self.solve_with_qr(x, y, &constant_cols);
            (coefficients, None, aliased, rank)
        };

        let fitted_values = linear_predictor(x, &coefficients, &aliased, intercept.unwrap_or(0.0));
        let residuals = Col::from_fn(n_samples, |i| y[i] - fitted_values[i]);

        let n_params = rank + usize::from(intercept.is_some());
        let mut result = self.compute_statistics(y, &residuals, intercept, n_params);
        result.coefficients = coefficients;
        result.intercept = intercept;
        result.residuals = residuals;
        result.fitted_values = fitted_values;
        result.rank = rank;
        result.aliased = aliased;

        if self.options.compute_inference {
            self.compute_inference(x, &mut result);
        }

        tracing::debug!(
            n = n_samples,
            p = n_features,
            rank,
            r_squared = result.r_squared,
            "fitted OLS model"
        );

        Ok(FittedOls {
            options: self.options.clone(),
            result,
            design: x.to_owned(),
            response: y.to_owned(),
            feature_names,
        })
    }
}

impl OlsRegressor {
    /// Solve the least squares problem using QR decomposition with column pivoting.
    ///
    /// Returns (coefficients, aliased, rank). Aliased coefficients are NaN.
    fn solve_with_qr(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
        constant_cols: &[bool],
    ) -> (Col<f64>, Vec<bool>, usize) {
        let n_features = x.ncols();
        let n_samples = x.nrows();

        let qr = x.col_piv_qr();
        let q = qr.compute_Q();
        let r = qr.R();
        let perm = qr.P();

        // perm_inv[j]: position of original column j after pivoting
        let perm_inv: Vec<usize> = perm.arrays().0[..n_features].to_vec();

        // Numerical rank from the R diagonal
        let mut rank = 0;
        for i in 0..n_features.min(n_samples) {
            if r[(i, i)].abs() > self.options.rank_tolerance {
                rank += 1;
            } else {
                break;
            }
        }

        let aliased: Vec<bool> = (0..n_features)
            .map(|j| constant_cols[j] || perm_inv[j] >= rank)
            .collect();

        if rank == 0 {
            return (Col::from_fn(n_features, |_| f64::NAN), vec![true; n_features], 0);
        }

        // Solve R * beta_perm = Q' * y by back-substitution
        let qty = q.transpose() * y;
        let mut beta_reduced = Col::zeros(rank);
        for i in (0..rank).rev() {
            let mut sum = qty[i];
            for j in (i + 1)..rank {
                sum -= r[(i, j)] * beta_reduced[j];
            }
            beta_reduced[i] = sum / r[(i, i)];
        }

        let coefficients = Col::from_fn(n_features, |j| {
            if aliased[j] {
                f64::NAN
            } else {
                beta_reduced[perm_inv[j]]
            }
        });

        (coefficients, aliased, rank)
    }

    /// Compute fit statistics.
    fn compute_statistics(
        &self,
        y: &Col<f64>,
        residuals: &Col<f64>,
        intercept: Option<f64>,
        n_params: usize,
    ) -> RegressionResult {
        let n = y.nrows();
        let mut result = RegressionResult::empty(0, n);

        let y_mean: f64 = y.iter().sum::<f64>() / n as f64;
        // Centered TSS with an intercept, uncentered without one.
        let center = if intercept.is_some() { y_mean } else { 0.0 };
        let tss: f64 = y.iter().map(|&yi| (yi - center).powi(2)).sum();
        let rss: f64 = residuals.iter().map(|&r| r.powi(2)).sum();

        let r_squared = if tss > 0.0 {
            (1.0 - rss / tss).clamp(0.0, 1.0)
        } else if rss < 1e-10 {
            1.0
        } else {
            0.0
        };

        let df_total = if intercept.is_some() { n - 1 } else { n } as f64;
        let df_resid = (n - n_params) as f64;
        let adj_r_squared = if df_resid > 0.0 && df_total > 0.0 {
            1.0 - (1.0 - r_squared) * df_total / df_resid
        } else {
            f64::NAN
        };

        let mse = if df_resid > 0.0 { rss / df_resid } else { f64::NAN };

        let df_model = (n_params - usize::from(intercept.is_some())) as f64;
        let f_statistic = if df_model > 0.0 && df_resid > 0.0 && mse > 0.0 {
            ((tss - rss) / df_model) / mse
        } else {
            f64::NAN
        };

        let f_pvalue = if f_statistic.is_finite() {
            FisherSnedecor::new(df_model, df_resid).map_or(f64::NAN, |d| d.sf(f_statistic))
        } else {
            f64::NAN
        };

        // Gaussian log-likelihood with the ML variance estimate
        let log_likelihood = if rss > 0.0 {
            -0.5 * n as f64 * (1.0 + (2.0 * std::f64::consts::PI).ln() + (rss / n as f64).ln())
        } else {
            f64::NAN
        };

        // The error variance counts as a parameter
        let k = n_params as f64 + 1.0;
        let aic = 2.0 * k - 2.0 * log_likelihood;
        let aicc = if (n as f64 - k - 1.0) > 0.0 {
            aic + 2.0 * k * (k + 1.0) / (n as f64 - k - 1.0)
        } else {
            f64::NAN
        };
        let bic = k * (n as f64).ln() - 2.0 * log_likelihood;

        result.n_parameters = n_params;
        result.r_squared = r_squared;
        result.adj_r_squared = adj_r_squared;
        result.mse = mse;
        result.rmse = mse.sqrt();
        result.f_statistic = f_statistic;
        result.f_pvalue = f_pvalue;
        result.aic = aic;
        result.aicc = aicc;
        result.bic = bic;
        result.log_likelihood = log_likelihood;
        result.confidence_level = self.options.confidence_level;
        result
    }

    /// Compute inference statistics (standard errors, t-stats, p-values, CIs).
    ///
    /// Left unset when the residual df is zero or X'X is singular.
    fn compute_inference(&self, x: &Mat<f64>, result: &mut RegressionResult) {
        let df = result.residual_df() as f64;
        if df <= 0.0 || !result.mse.is_finite() {
            return;
        }

        let standard_errors = if result.intercept.is_some() {
            CoefficientInference::standard_errors_with_intercept(x, result.mse, &result.aliased)
                .map(|(se, se_int)| (se, Some(se_int)))
        } else {
            CoefficientInference::standard_errors(x, result.mse, &result.aliased)
                .map(|se| (se, None))
        };

        let (se, se_int) = match standard_errors {
            Ok(v) => v,
            Err(reason) => {
                tracing::debug!(reason, "skipping coefficient inference");
                return;
            }
        };

        let t_stats = CoefficientInference::t_statistics(&result.coefficients, &se);
        let p_vals = CoefficientInference::p_values(&t_stats, df);
        let (ci_lower, ci_upper) = CoefficientInference::confidence_intervals(
            &result.coefficients,
            &se,
            df,
            self.options.confidence_level,
        );

        if let (Some(intercept), Some(se_int)) = (result.intercept, se_int) {
            let t_int = if se_int > 0.0 { intercept / se_int } else { f64::NAN };
            let t_dist = StudentsT::new(0.0, 1.0, df).ok();
            result.intercept_std_error = Some(se_int);
            result.intercept_p_value = Some(two_sided_p(t_dist.as_ref(), t_int));
        }

        result.std_errors = Some(se);
        result.t_statistics = Some(t_stats);
        result.p_values = Some(p_vals);
        result.conf_interval_lower = Some(ci_lower);
        result.conf_interval_upper = Some(ci_upper);
    }
}

fn linear_predictor(x: &Mat<f64>, coefficients: &Col<f64>, aliased: &[bool], intercept: f64) -> Col<f64> {
    Col::from_fn(x.nrows(), |i| {
        let mut pred = intercept;
        for j in 0..x.ncols() {
            if !aliased[j] && !coefficients[j].is_nan() {
                pred += x[(i, j)] * coefficients[j];
            }
        }
        pred
    })
}

/// A fitted OLS regression model.
///
/// Keeps the training design matrix and response so that diagnostics can be
/// computed from the model alone.
#[derive(Debug, Clone)]
pub struct FittedOls {
    options: RegressionOptions,
    result: RegressionResult,
    design: Mat<f64>,
    response: Col<f64>,
    feature_names: Vec<String>,
}

impl FittedOls {
    /// Get the options used to fit this model.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Training design matrix, without an intercept column.
    pub fn design(&self) -> &Mat<f64> {
        &self.design
    }

    /// Training response.
    pub fn response(&self) -> &Col<f64> {
        &self.response
    }

    /// One name per design matrix column.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn residuals(&self) -> &Col<f64> {
        &self.result.residuals
    }

    pub fn fitted_values(&self) -> &Col<f64> {
        &self.result.fitted_values
    }

    pub fn has_intercept(&self) -> bool {
        self.result.intercept.is_some()
    }
}

impl FittedRegressor for FittedOls {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        linear_predictor(
            x,
            &self.result.coefficients,
            &self.result.aliased,
            self.result.intercept.unwrap_or(0.0),
        )
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    builder: RegressionOptionsBuilder,
    feature_names: Option<Vec<String>>,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.builder = self.builder.with_intercept(include);
        self
    }

    /// Set whether to compute inference statistics.
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.builder = self.builder.compute_inference(compute);
        self
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.builder = self.builder.confidence_level(level);
        self
    }

    /// Set the rank tolerance for QR decomposition.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Name the design matrix columns (default `x1`, `x2`, ...).
    pub fn feature_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Build the OLS regressor. Options are validated when fitting.
    pub fn build(self) -> OlsRegressor {
        OlsRegressor {
            options: self.builder.build_unchecked(),
            feature_names: self.feature_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fit() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(5, |i| 2.0 + 3.0 * i as f64);

        let model = OlsRegressor::builder().with_intercept(true).build();
        let fitted = model.fit(&x, &y).expect("model should fit");

        assert!((fitted.coefficients()[0] - 3.0).abs() < 1e-10);
        assert!((fitted.intercept().expect("intercept exists") - 2.0).abs() < 1e-10);
        assert_eq!(fitted.feature_names(), &["x1".to_string()]);
    }

    #[test]
    fn test_predict() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(5, |i| 2.0 + 3.0 * i as f64);

        let model = OlsRegressor::builder().with_intercept(true).build();
        let fitted = model.fit(&x, &y).expect("model should fit");

        let x_new = Mat::from_fn(2, 1, |i, _| (i + 10) as f64);
        let preds = fitted.predict(&x_new);

        assert!((preds[0] - (2.0 + 3.0 * 10.0)).abs() < 1e-10);
        assert!((preds[1] - (2.0 + 3.0 * 11.0)).abs() < 1e-10);
    }

    #[test]
    fn test_feature_name_count_checked() {
        let x = Mat::from_fn(5, 2, |i, j| (i * (j + 1)) as f64 + (i * i) as f64 * j as f64);
        let y = Col::from_fn(5, |i| i as f64);

        let err = OlsRegressor::builder()
            .feature_names(["only_one"])
            .build()
            .fit(&x, &y)
            .unwrap_err();
        assert_eq!(err, RegressionError::FeatureNames { expected: 2, got: 1 });
    }

    #[test]
    fn test_invalid_options_rejected_at_fit() {
        let x = Mat::from_fn(5, 1, |i, _| i as f64);
        let y = Col::from_fn(5, |i| i as f64);

        let result = OlsRegressor::builder().confidence_level(2.0).build().fit(&x, &y);
        assert!(matches!(result, Err(RegressionError::InvalidOptions(_))));
    }

    #[test]
    fn test_collinear_column_is_aliased() {
        let x = Mat::from_fn(10, 2, |i, j| if j == 0 { i as f64 } else { 2.0 * i as f64 });
        let y = Col::from_fn(10, |i| 1.0 + i as f64);

        let fitted = OlsRegressor::builder().build().fit(&x, &y).unwrap();
        assert!(fitted.result().has_aliased());
        assert_eq!(fitted.result().rank, 1);
    }
}

//! Options for regression fits and association measures.

use crate::data::MissingPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration options for regression models.
#[derive(Debug, Clone)]
pub struct RegressionOptions {
    /// Whether to include an intercept term (default: true).
    pub with_intercept: bool,
    /// Whether to compute standard errors and inference statistics (default: true).
    pub compute_inference: bool,
    /// Confidence level for confidence intervals (default: 0.95).
    pub confidence_level: f64,
    /// Rank tolerance for QR decomposition.
    pub rank_tolerance: f64,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            with_intercept: true,
            compute_inference: true,
            confidence_level: 0.95,
            rank_tolerance: 1e-10,
        }
    }
}

/// Errors that can occur when validating options.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionsError {
    #[error("confidence_level must be in (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
    #[error("rank_tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
    #[error("min_observations must be at least 2, got {0}")]
    InvalidMinObservations(usize),
}

impl RegressionOptions {
    /// Create a new builder for regression options.
    pub fn builder() -> RegressionOptionsBuilder {
        RegressionOptionsBuilder::default()
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.confidence_level <= 0.0 || self.confidence_level >= 1.0 {
            return Err(OptionsError::InvalidConfidenceLevel(self.confidence_level));
        }
        if self.rank_tolerance <= 0.0 {
            return Err(OptionsError::InvalidTolerance(self.rank_tolerance));
        }
        Ok(())
    }
}

/// Builder for `RegressionOptions`.
#[derive(Debug, Clone, Default)]
pub struct RegressionOptionsBuilder {
    options: RegressionOptions,
}

impl RegressionOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.options.with_intercept = include;
        self
    }

    /// Set whether to compute inference statistics.
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.options.compute_inference = compute;
        self
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.options.confidence_level = level;
        self
    }

    /// Set the rank tolerance for QR decomposition.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.options.rank_tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<RegressionOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> RegressionOptions {
        self.options
    }
}

/// Configuration for [`associate_with`](crate::association::associate_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationOptions {
    /// How missing values are removed before pairing (default: pairwise).
    pub missing_policy: MissingPolicy,
    /// Apply the continuity correction to 2x2 tables before computing
    /// Cramér's V (default: false).
    pub yates_correction: bool,
    /// Minimum number of aligned pairs for a correlation (default: 2).
    pub min_observations: usize,
}

impl Default for AssociationOptions {
    fn default() -> Self {
        Self {
            missing_policy: MissingPolicy::Pairwise,
            yates_correction: false,
            min_observations: 2,
        }
    }
}

impl AssociationOptions {
    pub fn builder() -> AssociationOptionsBuilder {
        AssociationOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.min_observations < 2 {
            return Err(OptionsError::InvalidMinObservations(self.min_observations));
        }
        Ok(())
    }
}

/// Builder for `AssociationOptions`.
#[derive(Debug, Clone, Default)]
pub struct AssociationOptionsBuilder {
    options: AssociationOptions,
}

impl AssociationOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.options.missing_policy = policy;
        self
    }

    pub fn yates_correction(mut self, apply: bool) -> Self {
        self.options.yates_correction = apply;
        self
    }

    pub fn min_observations(mut self, n: usize) -> Self {
        self.options.min_observations = n;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<AssociationOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> AssociationOptions {
        self.options
    }
}

//! Statistical inference (standard errors, p-values, confidence intervals).

mod coefficient;

pub use coefficient::CoefficientInference;
pub(crate) use coefficient::two_sided_p;

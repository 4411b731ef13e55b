// src/error.rs
use crate::models::heston::VarianceQuadraticCoefficients;
use thiserror::Error;

/// Failure of a single variance update.
///
/// The quadratic update only yields a valid variance when `b² - 4ac >= b²`,
/// i.e. `ac <= 0`. Anything else means the parameter regime is outside what
/// the scheme supports.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VarianceStepError {
    #[error("discriminant {discriminant} is below b² = {b_squared} (v = {variance}, {coefficients})")]
    DiscriminantBelowBSquared {
        variance: f64,
        coefficients: VarianceQuadraticCoefficients,
        discriminant: f64,
        b_squared: f64,
    },

    #[error("leading coefficient a = {a} must be positive (v = {variance})")]
    NonPositiveLeadingCoefficient { variance: f64, a: f64 },
}

/// Custom error types for the heston-mc library
#[derive(Debug, Clone, Error)]
pub enum SdeError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// The variance step's precondition failed; the run cannot continue
    #[error("Variance step precondition violated on path {path}, step {step}: {source}")]
    PreconditionViolated {
        path: usize,
        step: usize,
        #[source]
        source: VarianceStepError,
    },

    /// Numerical instability or non-finite results
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },

    /// Monte Carlo simulation error
    #[error("Monte Carlo simulation error with {paths} paths: {reason}")]
    MonteCarloError { paths: usize, reason: String },

    /// RNG or random number generation error
    #[error("Random number generation error: {reason}")]
    RandomGenerationError { reason: String },
}

/// Result type alias for heston-mc operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Every discounted payoff is kept for the two-pass reduction, so the
    /// cap bounds that buffer at 800 MB.
    pub const MAX_PATHS: usize = 100_000_000;
    pub const MAX_STEPS: usize = 10_000_000;

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SdeResult<()> {
        if value >= 0.0 {
            Ok(())
        } else {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        }
    }

    /// Validate that a parameter is within a closed range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> SdeResult<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: format!("must be in range [{}, {}]", min, max),
            })
        }
    }

    /// Validate correlation parameter
    pub fn validate_correlation(name: &str, rho: f64) -> SdeResult<()> {
        validate_range(name, rho, -1.0, 1.0)
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        }
    }

    /// Validate the simulation window `[start, end]`
    pub fn validate_time_window(start: f64, end: f64) -> SdeResult<()> {
        validate_finite("start_time", start)?;
        validate_finite("end_time", end)?;
        if end > start {
            Ok(())
        } else {
            Err(SdeError::InvalidConfiguration {
                field: "end_time".to_string(),
                reason: format!("must be after start_time ({} <= {})", end, start),
            })
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> SdeResult<()> {
        if paths == 0 {
            Err(SdeError::InvalidConfiguration {
                field: "num_paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > MAX_PATHS {
            Err(SdeError::InvalidConfiguration {
                field: "num_paths".to_string(),
                reason: format!("exceeds maximum allowed ({})", MAX_PATHS),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> SdeResult<()> {
        if steps == 0 {
            Err(SdeError::InvalidConfiguration {
                field: "num_steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > MAX_STEPS {
            Err(SdeError::InvalidConfiguration {
                field: "num_steps".to_string(),
                reason: format!("exceeds maximum allowed ({})", MAX_STEPS),
            })
        } else {
            Ok(())
        }
    }
}

// src/error.rs
use thiserror::Error;

/// Error types for the bsm-montecarlo library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Invalid market parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Too few draws to form a sample variance
    #[error("Insufficient samples: got {samples}, need at least {required} to estimate a standard error")]
    InsufficientSamples { samples: usize, required: usize },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Numerical instability in an estimator
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },

    /// The reporting collaborator could not accept a result
    #[error("Reporting failed: {0}")]
    Reporting(String),
}

impl From<std::io::Error> for PricingError {
    fn from(err: std::io::Error) -> Self {
        PricingError::Reporting(err.to_string())
    }
}

/// Result type alias for bsm-montecarlo operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, PricingResult};

    /// Smallest sample count for which the sample variance is defined
    pub const MIN_SAMPLES: usize = 2;

    /// Upper bound on draws per run
    pub const MAX_SAMPLES: usize = 1_000_000_000;

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> PricingResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            validate_finite(name, value)
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricingResult<()> {
        if !value.is_finite() {
            Err(PricingError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the number of draws requested from an estimator
    pub fn validate_samples(samples: usize) -> PricingResult<()> {
        if samples < MIN_SAMPLES {
            Err(PricingError::InsufficientSamples {
                samples,
                required: MIN_SAMPLES,
            })
        } else if samples > MAX_SAMPLES {
            Err(PricingError::InvalidConfiguration {
                field: "samples".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
        assert!(validate_positive("sigma", f64::NAN).is_err());
        assert!(validate_positive("sigma", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("r", -0.01).is_ok());
        assert!(validate_finite("r", f64::NAN).is_err());
        assert!(validate_finite("r", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_samples() {
        assert_eq!(
            validate_samples(1),
            Err(PricingError::InsufficientSamples {
                samples: 1,
                required: 2
            })
        );
        assert!(validate_samples(0).is_err());
        assert!(validate_samples(2).is_ok());
        assert!(matches!(
            validate_samples(MAX_SAMPLES + 1),
            Err(PricingError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let error = PricingError::InvalidParameters {
            parameter: "k".to_string(),
            value: -5.0,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("'k'"));
        assert!(display.contains("-5"));
        assert!(display.contains("positive"));

        let display = PricingError::InsufficientSamples {
            samples: 1,
            required: 2,
        }
        .to_string();
        assert!(display.contains("got 1"));
    }
}

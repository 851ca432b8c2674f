//! Error types shared by every estimator in the crate.

use thiserror::Error;

/// Result alias used throughout `mcint`.
pub type Result<T> = std::result::Result<T, McError>;

/// Failures raised synchronously by the estimators.
///
/// Nothing is retried internally: a caller that hits one of these should fix
/// its inputs and call again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// A sample count, bound, or option that can never be valid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A square root was asked of a negative radicand.
    #[error("domain error: negative radicand {radicand:e} in {context}")]
    Domain {
        /// The offending radicand.
        radicand: f64,
        /// Where the square root was taken.
        context: &'static str,
    },

    /// The integrand produced NaN or an infinity.
    #[error("numeric error: integrand returned {value} at {point:?}")]
    Numeric {
        /// The non-finite value.
        value: f64,
        /// The point at which it was produced.
        point: Vec<f64>,
    },
}

impl McError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        McError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = McError::invalid("sample count must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid argument: sample count must be at least 1"
        );

        let err = McError::Domain {
            radicand: -0.25,
            context: "hemisphere height",
        };
        assert!(err.to_string().contains("hemisphere height"));

        let err = McError::Numeric {
            value: f64::NAN,
            point: vec![0.5],
        };
        assert!(err.to_string().contains("NaN"));
    }
}

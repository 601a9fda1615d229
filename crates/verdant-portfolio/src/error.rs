//! Error types for portfolio analytics.
//!
//! Every variant describes a caller input defect or an explicit caller
//! request (cancellation). Nothing in this crate performs I/O, so there is no
//! transient failure to retry.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// The holdings sequence was empty.
    #[error("Portfolio has no holdings")]
    EmptyPortfolio,

    /// A holding has non-positive shares or cost basis.
    #[error("Invalid holding '{id}': {reason}")]
    InvalidHolding {
        /// The holding identifier.
        id: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// The ESG score sequence does not line up with the holdings.
    #[error("ESG score count mismatch: {holdings} holdings but {scores} scores")]
    ScoreMismatch {
        /// Number of holdings supplied.
        holdings: usize,
        /// Number of ESG scores supplied.
        scores: usize,
    },

    /// An ESG score is non-finite or outside [0, 100].
    #[error("Invalid ESG score at position {index}: {value}")]
    InvalidScore {
        /// Position of the score in the sequence.
        index: usize,
        /// The offending value, formatted.
        value: String,
    },

    /// Total book value of the portfolio is not a positive, representable
    /// amount.
    #[error("Degenerate portfolio value: total book value is {total}")]
    DegenerateValue {
        /// The computed total, formatted, or a note that it overflowed.
        total: String,
    },

    /// A metric came out non-finite despite valid input.
    #[error("Non-finite result produced for {metric}")]
    Numeric {
        /// The metric that failed.
        metric: String,
    },

    /// Model or simulation parameters are unusable.
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// The offending parameter.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The caller cancelled a simulation in flight.
    #[error("Simulation cancelled after {completed} of {requested} trials")]
    Cancelled {
        /// Trials finished before the cancellation was observed.
        completed: usize,
        /// Trials requested.
        requested: usize,
    },
}

impl PortfolioError {
    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a numeric error for the named metric.
    #[must_use]
    pub fn numeric(metric: impl Into<String>) -> Self {
        Self::Numeric {
            metric: metric.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors raised by input validation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyPortfolio
                | Self::InvalidHolding { .. }
                | Self::ScoreMismatch { .. }
                | Self::InvalidScore { .. }
                | Self::DegenerateValue { .. }
        )
    }
}

/// Guards a computed value against NaN and infinities.
pub(crate) fn ensure_finite(metric: &str, value: f64) -> PortfolioResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PortfolioError::numeric(metric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::invalid_holding("INFY", "shares must be positive");
        assert!(err.to_string().contains("INFY"));
        assert!(err.to_string().contains("shares must be positive"));

        let err = PortfolioError::ScoreMismatch {
            holdings: 3,
            scores: 2,
        };
        assert!(err.to_string().contains("3 holdings"));
        assert!(err.to_string().contains("2 scores"));

        let err = PortfolioError::EmptyPortfolio;
        assert!(err.to_string().contains("no holdings"));
    }

    #[test]
    fn test_is_validation() {
        assert!(PortfolioError::EmptyPortfolio.is_validation());
        assert!(PortfolioError::DegenerateValue {
            total: "0".into()
        }
        .is_validation());
        assert!(!PortfolioError::numeric("mean_return").is_validation());
        assert!(!PortfolioError::Cancelled {
            completed: 1,
            requested: 2
        }
        .is_validation());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 1.5).unwrap(), 1.5);
        assert_eq!(
            ensure_finite("sharpe_ratio", f64::NAN),
            Err(PortfolioError::numeric("sharpe_ratio"))
        );
        assert!(ensure_finite("var_95", f64::NEG_INFINITY).is_err());
    }
}

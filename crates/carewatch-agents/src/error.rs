//! Error types for the carewatch-agents crate.
//!
//! Detection never panics on bad input. Input problems fail the single
//! record fast; arithmetic problems inside severity scoring are reported
//! separately so the alert can still be emitted.

use carewatch_types::TimestampError;

/// Errors that can occur while processing a reading or managing reminders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// A timestamp field was absent or blank.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Name of the field.
        field: &'static str,
    },

    /// A timestamp field could not be parsed.
    #[error("invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp {
        /// Name of the field.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// A numeric input was NaN or infinite.
    #[error("non-finite value for `{metric}`")]
    NonFiniteValue {
        /// The metric or field carrying the value.
        metric: String,
    },

    /// A reminder could not be constructed.
    #[error("invalid reminder: {reason}")]
    InvalidReminder {
        /// Why the reminder was rejected.
        reason: String,
    },

    /// Monitoring configuration failed validation.
    #[error("invalid monitoring config: {0}")]
    InvalidConfig(String),
}

impl From<TimestampError> for AgentError {
    fn from(err: TimestampError) -> Self {
        match err {
            TimestampError::Missing { field } => Self::MissingField { field },
            TimestampError::Invalid { field, value } => Self::InvalidTimestamp { field, value },
        }
    }
}

/// Errors from severity scoring.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SeverityError {
    /// The bound used as divisor is zero, so relative deviation is undefined.
    #[error("relative deviation undefined: threshold {bound} is zero (value {value})")]
    ZeroBound {
        /// Which bound (`min` or `max`).
        bound: &'static str,
        /// The value being scored.
        value: f64,
    },
}

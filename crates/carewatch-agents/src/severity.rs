//! Severity scoring for out-of-range health metrics.
//!
//! ```text
//! deviation = (min - value) / min   if value < min
//!           = (value - max) / max   if value > max
//! severity  = high   if deviation > 0.5
//!           = medium if deviation > 0.2
//!           = low    otherwise
//! ```
//!
//! Both cut-offs are strict: a deviation of exactly 0.5 is `medium` and
//! exactly 0.2 is `low`.

use carewatch_types::{Severity, Threshold};

use crate::error::SeverityError;

/// Relative deviation above which an alert is `high`.
pub const HIGH_DEVIATION: f64 = 0.5;

/// Relative deviation above which an alert is `medium`.
pub const MEDIUM_DEVIATION: f64 = 0.2;

/// Map a relative deviation onto a severity tier.
pub const fn classify_deviation(deviation: f64) -> Severity {
    if deviation > HIGH_DEVIATION {
        Severity::High
    } else if deviation > MEDIUM_DEVIATION {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Relative deviation of `value` from the nearest violated bound.
///
/// Returns `Ok(None)` when the value is inside the threshold.
///
/// # Errors
///
/// [`SeverityError::ZeroBound`] when the violated bound is zero.
pub fn relative_deviation(value: f64, threshold: &Threshold) -> Result<Option<f64>, SeverityError> {
    if value < threshold.min {
        if is_zero(threshold.min) {
            return Err(SeverityError::ZeroBound { bound: "min", value });
        }
        Ok(Some((threshold.min - value) / threshold.min))
    } else if value > threshold.max {
        if is_zero(threshold.max) {
            return Err(SeverityError::ZeroBound { bound: "max", value });
        }
        Ok(Some((value - threshold.max) / threshold.max))
    } else {
        Ok(None)
    }
}

/// Severity of `value` against `threshold`. In-range values score `low`.
///
/// # Errors
///
/// [`SeverityError::ZeroBound`] when the violated bound is zero. Callers
/// still raise the alert, at [`Severity::High`].
pub fn classify(value: f64, threshold: &Threshold) -> Result<Severity, SeverityError> {
    Ok(relative_deviation(value, threshold)?.map_or(Severity::Low, classify_deviation))
}

const fn is_zero(bound: f64) -> bool {
    bound.abs() < f64::MIN_POSITIVE
}

//! Fall and inactivity detection.

use carewatch_types::{Acceleration, Alert};
use chrono::{NaiveDateTime, TimeDelta};

use crate::error::AgentError;

/// Acceleration magnitude that signals a fall at sensitivity 1.0.
pub const BASE_FALL_THRESHOLD: f64 = 32.0;

/// Magnitude a sample must exceed to count as a fall.
pub const fn fall_threshold(sensitivity: f64) -> f64 {
    BASE_FALL_THRESHOLD * sensitivity
}

/// Raise a fall alert when the sample's magnitude strictly exceeds the
/// scaled threshold.
///
/// # Errors
///
/// [`AgentError::NonFiniteValue`] if any axis is NaN or infinite.
pub fn detect_fall(
    acceleration: &Acceleration,
    sensitivity: f64,
    timestamp: NaiveDateTime,
) -> Result<Option<Alert>, AgentError> {
    for (axis, value) in [
        ("acceleration.x", acceleration.x),
        ("acceleration.y", acceleration.y),
        ("acceleration.z", acceleration.z),
    ] {
        if !value.is_finite() {
            return Err(AgentError::NonFiniteValue {
                metric: axis.to_owned(),
            });
        }
    }

    let magnitude = acceleration.magnitude();
    Ok((magnitude > fall_threshold(sensitivity))
        .then(|| Alert::fall(*acceleration, magnitude, timestamp)))
}

/// Raise an inactivity alert when more than `threshold` has passed since
/// `last_movement`.
///
/// `last_movement` must be the baseline as it stood before the current
/// reading was applied.
pub fn detect_inactivity(
    last_movement: NaiveDateTime,
    timestamp: NaiveDateTime,
    threshold: TimeDelta,
) -> Option<Alert> {
    let idle = timestamp.signed_duration_since(last_movement);
    (idle > threshold).then(|| Alert::inactivity(minutes(idle), timestamp))
}

/// Fractional minutes in `delta`, saturating for spans beyond `i32` seconds.
fn minutes(delta: TimeDelta) -> f64 {
    let seconds =
        i32::try_from(delta.num_seconds()).map_or_else(|_| f64::from(i32::MAX), f64::from);
    let nanos = f64::from(delta.subsec_nanos()) / 1_000_000_000.0;
    (seconds + nanos) / 60.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use carewatch_types::Severity;
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn equal_axes_trigger_fall() {
        let accel = Acceleration { x: 20.0, y: 20.0, z: 20.0 };
        let alert = detect_fall(&accel, 0.8, at(10, 0)).unwrap().unwrap();
        assert_eq!(alert.severity(), Severity::High);
        match alert {
            Alert::FallDetected(fall) => {
                assert!((fall.magnitude - 34.641).abs() < 1e-3);
                assert_eq!(fall.acceleration_data, accel);
            }
            other => panic!("unexpected alert {other:?}"),
        }
    }

    #[test]
    fn magnitude_at_threshold_does_not_fire() {
        let accel = Acceleration { x: 32.0, y: 0.0, z: 0.0 };
        assert!(detect_fall(&accel, 1.0, at(10, 0)).unwrap().is_none());

        let accel = Acceleration { x: 32.5, y: 0.0, z: 0.0 };
        assert!(detect_fall(&accel, 1.0, at(10, 0)).unwrap().is_some());
    }

    #[test]
    fn fall_is_monotonic_in_magnitude() {
        let fired: Vec<bool> = (0..60)
            .map(|x| {
                let accel = Acceleration { x: f64::from(x), y: 0.0, z: 0.0 };
                detect_fall(&accel, 0.8, at(10, 0)).unwrap().is_some()
            })
            .collect();
        let first = fired.iter().position(|&f| f).unwrap();
        assert!(fired.iter().skip(first).all(|&f| f));
        assert!(fired.iter().take(first).all(|&f| !f));
    }

    #[test]
    fn non_finite_axis_is_rejected() {
        let accel = Acceleration { x: 1.0, y: f64::INFINITY, z: 0.0 };
        assert!(matches!(
            detect_fall(&accel, 0.8, at(10, 0)),
            Err(AgentError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn inactivity_requires_exceeding_window() {
        let window = TimeDelta::minutes(120);
        assert!(detect_inactivity(at(8, 0), at(10, 0), window).is_none());

        let alert = detect_inactivity(at(8, 0), at(10, 30), window).unwrap();
        assert_eq!(alert.severity(), Severity::Medium);
        match alert {
            Alert::Inactivity(a) => assert!((a.duration_minutes - 150.0).abs() < 1e-9),
            other => panic!("unexpected alert {other:?}"),
        }
    }

    #[test]
    fn very_long_idle_span_saturates() {
        let idle = TimeDelta::days(36_500);
        let saturated = f64::from(i32::MAX) / 60.0;
        assert!((minutes(idle) - saturated).abs() < 1e-6);
        assert!((minutes(TimeDelta::seconds(90)) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn reading_before_baseline_is_not_inactive() {
        assert!(detect_inactivity(at(12, 0), at(9, 0), TimeDelta::minutes(120)).is_none());
    }
}

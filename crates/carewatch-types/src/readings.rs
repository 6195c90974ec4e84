//! Inbound telemetry readings and reference values.
//!
//! Readings are ephemeral: constructed per request, consumed by exactly
//! one detection pass, never retained. Timestamps stay as raw strings
//! here so the agent can report a missing or malformed field by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Threshold
// ---------------------------------------------------------------------------

/// Acceptable closed range `[min, max]` for one health metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Threshold {
    /// Lowest acceptable value (inclusive).
    pub min: f64,
    /// Highest acceptable value (inclusive).
    pub max: f64,
}

impl Threshold {
    /// Build a threshold, returning `None` unless `min <= max` and both
    /// bounds are finite.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        (min.is_finite() && max.is_finite() && min <= max).then_some(Self { min, max })
    }

    /// Whether `value` lies inside `[min, max]`.
    pub const fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// One vital-signs sample: metric name to value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthReading {
    /// ISO-8601 time the sample was taken.
    #[serde(default)]
    pub timestamp: String,
    /// Metric values keyed by metric name (e.g. `heart_rate`).
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Safety
// ---------------------------------------------------------------------------

/// Three-axis acceleration sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Acceleration {
    /// X-axis component.
    pub x: f64,
    /// Y-axis component.
    pub y: f64,
    /// Z-axis component.
    pub z: f64,
}

impl Acceleration {
    /// Euclidean magnitude `sqrt(x^2 + y^2 + z^2)`.
    pub fn magnitude(&self) -> f64 {
        self.z.mul_add(self.z, self.x.mul_add(self.x, self.y * self.y)).sqrt()
    }
}

/// One motion sample from a wearable or room sensor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SafetyReading {
    /// Acceleration data, when the device reports it.
    #[serde(default)]
    pub acceleration: Option<Acceleration>,
    /// Whether the sensor saw movement.
    #[serde(default)]
    pub movement_detected: bool,
    /// ISO-8601 time of the sample.
    #[serde(default)]
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

/// A reminder supplied inline with a reminder check rather than taken
/// from the agent's own schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PendingReminder {
    /// What the person should do.
    pub activity: String,
    /// ISO-8601 time the activity is due.
    #[serde(default)]
    pub time: String,
}

/// A reminder check: evaluate reminders against `current_time`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReminderCheck {
    /// ISO-8601 time to evaluate at.
    #[serde(default)]
    pub current_time: String,
    /// Inline reminders. When `None` the agent's own schedule is used.
    #[serde(default)]
    pub reminders: Option<Vec<PendingReminder>>,
}

//! Alert records produced by detection passes.
//!
//! Every alert is an immutable value. The [`Alert`] union is serialized
//! with a `type` tag (`health_threshold`, `fall_detected`, `inactivity`,
//! `upcoming_reminder`, `daily_check`) followed by the variant's fields,
//! so all variants share `severity` and `timestamp` on the wire as well
//! as through [`Alert::severity`] and [`Alert::timestamp`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AgentType, Severity};
use crate::ids::ReminderId;
use crate::readings::{Acceleration, Threshold};

// ---------------------------------------------------------------------------
// Per-domain payloads
// ---------------------------------------------------------------------------

/// A vital sign outside its configured range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthAlert {
    /// Metric name (e.g. `heart_rate`).
    pub metric: String,
    /// The observed value.
    pub value: f64,
    /// The range the value fell outside of.
    pub threshold: Threshold,
    /// Severity derived from the relative deviation.
    pub severity: Severity,
    /// Time of the reading.
    pub timestamp: NaiveDateTime,
}

/// An acceleration spike consistent with a fall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FallAlert {
    /// The raw acceleration sample.
    pub acceleration_data: Acceleration,
    /// Its Euclidean magnitude.
    pub magnitude: f64,
    /// Always [`Severity::High`].
    pub severity: Severity,
    /// Time of the reading.
    pub timestamp: NaiveDateTime,
}

/// No movement for longer than the configured window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InactivityAlert {
    /// Minutes since the last recorded movement.
    pub duration_minutes: f64,
    /// Always [`Severity::Medium`].
    pub severity: Severity,
    /// Time of the reading.
    pub timestamp: NaiveDateTime,
}

/// A reminder that is due within the advance-notice window (or overdue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpcomingReminderAlert {
    /// The reminder this alert was raised for.
    pub reminder_id: ReminderId,
    /// The activity to remind about.
    pub activity: String,
    /// When the activity is due.
    pub scheduled_time: NaiveDateTime,
    /// Always [`Severity::Low`].
    pub severity: Severity,
    /// Time of the check that raised the alert.
    pub timestamp: NaiveDateTime,
}

/// The current time matched a configured daily check-in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DailyCheckAlert {
    /// The configured `HH:MM` check-in slot that matched.
    pub check_time: String,
    /// Always [`Severity::Low`].
    pub severity: Severity,
    /// Time of the check that raised the alert.
    pub timestamp: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Alert union
// ---------------------------------------------------------------------------

/// Any alert raised by a monitoring agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alert {
    /// See [`HealthAlert`].
    HealthThreshold(HealthAlert),
    /// See [`FallAlert`].
    FallDetected(FallAlert),
    /// See [`InactivityAlert`].
    Inactivity(InactivityAlert),
    /// See [`UpcomingReminderAlert`].
    UpcomingReminder(UpcomingReminderAlert),
    /// See [`DailyCheckAlert`].
    DailyCheck(DailyCheckAlert),
}

impl Alert {
    /// Build a fall alert (fixed severity `high`).
    pub const fn fall(
        acceleration_data: Acceleration,
        magnitude: f64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self::FallDetected(FallAlert {
            acceleration_data,
            magnitude,
            severity: Severity::High,
            timestamp,
        })
    }

    /// Build an inactivity alert (fixed severity `medium`).
    pub const fn inactivity(duration_minutes: f64, timestamp: NaiveDateTime) -> Self {
        Self::Inactivity(InactivityAlert {
            duration_minutes,
            severity: Severity::Medium,
            timestamp,
        })
    }

    /// Build a daily check-in alert (fixed severity `low`).
    pub const fn daily_check(check_time: String, timestamp: NaiveDateTime) -> Self {
        Self::DailyCheck(DailyCheckAlert {
            check_time,
            severity: Severity::Low,
            timestamp,
        })
    }

    /// Severity of the alert.
    pub const fn severity(&self) -> Severity {
        match self {
            Self::HealthThreshold(a) => a.severity,
            Self::FallDetected(a) => a.severity,
            Self::Inactivity(a) => a.severity,
            Self::UpcomingReminder(a) => a.severity,
            Self::DailyCheck(a) => a.severity,
        }
    }

    /// Time the alert refers to.
    pub const fn timestamp(&self) -> NaiveDateTime {
        match self {
            Self::HealthThreshold(a) => a.timestamp,
            Self::FallDetected(a) => a.timestamp,
            Self::Inactivity(a) => a.timestamp,
            Self::UpcomingReminder(a) => a.timestamp,
            Self::DailyCheck(a) => a.timestamp,
        }
    }

    /// The serialized `type` tag.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::HealthThreshold(_) => "health_threshold",
            Self::FallDetected(_) => "fall_detected",
            Self::Inactivity(_) => "inactivity",
            Self::UpcomingReminder(_) => "upcoming_reminder",
            Self::DailyCheck(_) => "daily_check",
        }
    }

    /// The agent type whose domain this alert belongs to.
    pub const fn domain(&self) -> AgentType {
        match self {
            Self::HealthThreshold(_) => AgentType::HealthMonitor,
            Self::FallDetected(_) | Self::Inactivity(_) => AgentType::SafetyMonitor,
            Self::UpcomingReminder(_) | Self::DailyCheck(_) => AgentType::ReminderAgent,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn fixed_severities() {
        let accel = Acceleration { x: 30.0, y: 0.0, z: 0.0 };
        assert_eq!(Alert::fall(accel, 30.0, noon()).severity(), Severity::High);
        assert_eq!(Alert::inactivity(150.0, noon()).severity(), Severity::Medium);
        assert_eq!(
            Alert::daily_check("12:00".to_owned(), noon()).severity(),
            Severity::Low
        );
    }

    #[test]
    fn serialized_with_type_tag() {
        let alert = Alert::HealthThreshold(HealthAlert {
            metric: "heart_rate".to_owned(),
            value: 130.0,
            threshold: Threshold { min: 60.0, max: 100.0 },
            severity: Severity::Medium,
            timestamp: noon(),
        });
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "health_threshold");
        assert_eq!(json["metric"], "heart_rate");
        assert_eq!(json["severity"], "medium");
        assert_eq!(json["threshold"]["max"], 100.0);
    }

    #[test]
    fn deserializes_from_tagged_json() {
        let json = serde_json::json!({
            "type": "inactivity",
            "duration_minutes": 180.0,
            "severity": "medium",
            "timestamp": "2024-05-01T12:00:00"
        });
        let alert: Alert = serde_json::from_value(json).unwrap();
        assert_eq!(alert.kind(), "inactivity");
        assert_eq!(alert.domain(), AgentType::SafetyMonitor);
        assert_eq!(alert.timestamp(), noon());
    }
}

//! Monitoring thresholds and schedules.
//!
//! Mirrors the `monitoring` section of `carewatch-config.yaml`. Every
//! field has a default matching the values the service has always
//! shipped with, so an empty section yields a working configuration.
//! Values are immutable once agents are built from them.

use std::collections::BTreeMap;

use carewatch_types::Threshold;
use chrono::{NaiveTime, TimeDelta};
use serde::Deserialize;

use crate::error::AgentError;

/// Thresholds and timing parameters for all three detection domains.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitoringConfig {
    /// Acceptable range per health metric.
    #[serde(default = "default_health_thresholds")]
    pub health_thresholds: BTreeMap<String, Threshold>,

    /// Minutes without movement before an inactivity alert.
    #[serde(default = "default_inactivity_threshold_minutes")]
    pub inactivity_threshold_minutes: u32,

    /// Multiplier applied to the base fall threshold of 32.0.
    #[serde(default = "default_fall_detection_sensitivity")]
    pub fall_detection_sensitivity: f64,

    /// Minutes before a reminder at which it becomes alertable.
    #[serde(default = "default_reminder_advance_notice_minutes")]
    pub reminder_advance_notice_minutes: u32,

    /// Daily `HH:MM` check-in times.
    #[serde(default = "default_daily_reminder_times")]
    pub daily_reminder_times: Vec<String>,

    /// Delivery settings. Carried for callers that deliver alerts; this
    /// crate does not act on them.
    #[serde(default)]
    pub alerts: AlertDeliveryConfig,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            health_thresholds: default_health_thresholds(),
            inactivity_threshold_minutes: default_inactivity_threshold_minutes(),
            fall_detection_sensitivity: default_fall_detection_sensitivity(),
            reminder_advance_notice_minutes: default_reminder_advance_notice_minutes(),
            daily_reminder_times: default_daily_reminder_times(),
            alerts: AlertDeliveryConfig::default(),
        }
    }
}

impl MonitoringConfig {
    /// Inactivity window as a duration.
    pub fn inactivity_threshold(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.inactivity_threshold_minutes))
    }

    /// Advance-notice window as a duration.
    pub fn advance_notice(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.reminder_advance_notice_minutes))
    }

    /// Check invariants that serde cannot express.
    ///
    /// - every threshold has finite bounds with `min <= max`
    /// - fall sensitivity is finite and positive
    /// - every daily time is a valid `HH:MM`
    pub fn validate(&self) -> Result<(), AgentError> {
        for (metric, threshold) in &self.health_thresholds {
            if Threshold::new(threshold.min, threshold.max).is_none() {
                return Err(AgentError::InvalidConfig(format!(
                    "threshold for {metric} must satisfy min <= max (got {} > {})",
                    threshold.min, threshold.max
                )));
            }
        }

        if !self.fall_detection_sensitivity.is_finite() || self.fall_detection_sensitivity <= 0.0 {
            return Err(AgentError::InvalidConfig(format!(
                "fall_detection_sensitivity must be positive (got {})",
                self.fall_detection_sensitivity
            )));
        }

        for time in &self.daily_reminder_times {
            if NaiveTime::parse_from_str(time, "%H:%M").is_err() || time.len() != 5 {
                return Err(AgentError::InvalidConfig(format!(
                    "daily reminder time {time:?} is not HH:MM"
                )));
            }
        }

        Ok(())
    }
}

/// A person to contact when an alert is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmergencyContact {
    /// Display name.
    pub name: String,
    /// Phone number or other address understood by the delivery layer.
    pub contact: String,
}

/// Alert delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertDeliveryConfig {
    /// Who to notify.
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,

    /// Minutes between delivery attempts.
    #[serde(default = "default_retry_interval_minutes")]
    pub retry_interval_minutes: u32,

    /// Maximum delivery attempts per alert.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for AlertDeliveryConfig {
    fn default() -> Self {
        Self {
            emergency_contacts: Vec::new(),
            retry_interval_minutes: default_retry_interval_minutes(),
            max_retries: default_max_retries(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_health_thresholds() -> BTreeMap<String, Threshold> {
    [
        ("heart_rate", 60.0, 100.0),
        ("blood_pressure_systolic", 90.0, 140.0),
        ("blood_pressure_diastolic", 60.0, 90.0),
        ("glucose_level", 70.0, 180.0),
    ]
    .into_iter()
    .map(|(metric, min, max)| (metric.to_owned(), Threshold { min, max }))
    .collect()
}

const fn default_inactivity_threshold_minutes() -> u32 {
    120
}

const fn default_fall_detection_sensitivity() -> f64 {
    0.8
}

const fn default_reminder_advance_notice_minutes() -> u32 {
    30
}

fn default_daily_reminder_times() -> Vec<String> {
    ["08:00", "12:00", "16:00", "20:00"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

const fn default_retry_interval_minutes() -> u32 {
    5
}

const fn default_max_retries() -> u32 {
    3
}

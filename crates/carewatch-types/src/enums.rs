//! Enumeration types shared by every monitoring domain.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Agent type
// ---------------------------------------------------------------------------

/// The detection domain an agent is responsible for.
///
/// Serialized with the exact tag names used in status listings and log
/// lines (`HealthMonitor`, `SafetyMonitor`, `ReminderAgent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AgentType {
    /// Vital-sign threshold monitoring.
    HealthMonitor,
    /// Fall and inactivity detection.
    SafetyMonitor,
    /// Scheduled reminders and daily check-ins.
    ReminderAgent,
}

impl AgentType {
    /// The tag name as it appears in serialized output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HealthMonitor => "HealthMonitor",
            Self::SafetyMonitor => "SafetyMonitor",
            Self::ReminderAgent => "ReminderAgent",
        }
    }
}

impl core::fmt::Display for AgentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Qualitative urgency tier of an alert.
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; no urgency.
    Low,
    /// Needs attention soon.
    Medium,
    /// Needs immediate attention.
    High,
}

impl Severity {
    /// Lowercase name (`low`, `medium`, `high`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Activity log level
// ---------------------------------------------------------------------------

/// Level of an activity-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Routine activity.
    Info,
    /// A detected condition or degraded behavior.
    Warning,
    /// A failure.
    Error,
}

// ---------------------------------------------------------------------------
// Report status
// ---------------------------------------------------------------------------

/// Overall outcome of one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Nothing abnormal was detected.
    Normal,
    /// At least one alert was raised.
    Alert,
}

impl ReportStatus {
    /// `Alert` when `alert_count > 0`, otherwise `Normal`.
    pub const fn from_alert_count(alert_count: usize) -> Self {
        if alert_count > 0 { Self::Alert } else { Self::Normal }
    }
}

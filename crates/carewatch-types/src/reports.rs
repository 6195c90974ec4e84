//! Structured results of one detection pass per domain.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::alerts::Alert;
use crate::enums::ReportStatus;
use crate::reminder::Reminder;

/// Result of a health detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthReport {
    /// `alert` if any alert was raised.
    pub status: ReportStatus,
    /// One alert per out-of-range metric.
    pub alerts: Vec<Alert>,
    /// The metrics exactly as received.
    pub data: BTreeMap<String, f64>,
}

/// Result of a safety detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SafetyReport {
    /// `alert` if any alert was raised.
    pub status: ReportStatus,
    /// Fall and/or inactivity alerts.
    pub alerts: Vec<Alert>,
    /// The movement baseline after this reading was applied.
    pub last_movement: NaiveDateTime,
}

/// Result of a reminder detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReminderReport {
    /// `alert` if any alert was raised.
    pub status: ReportStatus,
    /// Upcoming-reminder and daily check-in alerts.
    pub alerts: Vec<Alert>,
    /// Future reminders outside the advance-notice window.
    pub upcoming_reminders: Vec<Reminder>,
}

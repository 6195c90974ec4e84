//! Shared value types for the Carewatch monitoring core.
//!
//! This crate is the single source of truth for the records that cross
//! crate boundaries: readings going into the agents, alerts and reports
//! coming out. Types flow downstream to `TypeScript` via `ts-rs` for
//! caregiver-facing front ends.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for agents and reminders
//! - [`enums`] -- Agent types, severities, log levels, report status
//! - [`readings`] -- Inbound telemetry and thresholds
//! - [`reminder`] -- Scheduled reminder records
//! - [`alerts`] -- The [`Alert`] tagged union and its per-domain payloads
//! - [`reports`] -- Per-domain detection results
//! - [`time`] -- ISO-8601 timestamp parsing

pub mod alerts;
pub mod enums;
pub mod ids;
pub mod readings;
pub mod reminder;
pub mod reports;
pub mod time;

// Re-export all public types at crate root for convenience.
pub use alerts::{
    Alert, DailyCheckAlert, FallAlert, HealthAlert, InactivityAlert, UpcomingReminderAlert,
};
pub use enums::{ActivityLevel, AgentType, ReportStatus, Severity};
pub use ids::{AgentId, ReminderId};
pub use readings::{
    Acceleration, HealthReading, PendingReminder, ReminderCheck, SafetyReading, Threshold,
};
pub use reminder::Reminder;
pub use reports::{HealthReport, ReminderReport, SafetyReport};
pub use time::{TimestampError, clock_hhmm, parse_timestamp};

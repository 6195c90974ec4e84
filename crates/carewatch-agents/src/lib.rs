//! Monitoring agents for the Carewatch core.
//!
//! Three long-lived agents, one per detection domain, each with a stable
//! identity and a bounded activity log:
//!
//! | Agent | Detects | State |
//! |-------|---------|-------|
//! | [`HealthAgent`] | vital signs outside configured thresholds | none |
//! | [`SafetyAgent`] | falls, prolonged inactivity | last movement time |
//! | [`ReminderAgent`] | due reminders, daily check-ins | scheduled reminders |
//!
//! Detection is synchronous and pure ([`detection`]). Narration is a
//! separate async stage ([`handling`]) that takes one alert at a time.
//! [`CareMonitor`] owns one of each agent and routes tagged telemetry.
//!
//! # Modules
//!
//! - [`activity`] -- Bounded activity log mirrored to `tracing`
//! - [`agent`] -- Agent identity and the [`MonitoringAgent`] trait
//! - [`config`] -- Thresholds, windows, and daily check-in times
//! - [`detection`] -- Pure per-domain detection passes
//! - [`error`] -- [`AgentError`] and [`SeverityError`]
//! - [`handling`] -- The alert handling cycle
//! - [`monitor`] -- [`CareMonitor`] and batch processing
//! - [`severity`] -- Relative-deviation severity scoring

pub mod activity;
pub mod agent;
pub mod config;
pub mod detection;
pub mod error;
pub mod handling;
pub mod health_agent;
pub mod monitor;
pub mod reminder_agent;
pub mod safety_agent;
pub mod severity;

pub use activity::{ActivityEntry, ActivityLog};
pub use agent::{AgentIdentity, MonitoringAgent};
pub use config::{AlertDeliveryConfig, EmergencyContact, MonitoringConfig};
pub use error::{AgentError, SeverityError};
pub use health_agent::HealthAgent;
pub use monitor::{CareMonitor, DetectionReport, NarrationSummary, RecordOutcome, TelemetryRecord};
pub use reminder_agent::ReminderAgent;
pub use safety_agent::SafetyAgent;

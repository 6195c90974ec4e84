//! Process-wide owner of the three monitoring agents.
//!
//! [`CareMonitor`] is built once at startup and borrowed by every caller;
//! all of its methods take `&self`, so it can also sit behind an `Arc`
//! when shared across tasks. It routes tagged telemetry records to the agent for their domain and
//! keeps one record's failure from affecting any other.

use carewatch_narrator::Narrator;
use carewatch_types::{
    Alert, AgentType, HealthReading, HealthReport, ReminderCheck, ReminderReport, ReportStatus,
    SafetyReading, SafetyReport,
};
use serde::{Deserialize, Serialize};

use crate::agent::{AgentIdentity, MonitoringAgent};
use crate::config::MonitoringConfig;
use crate::error::AgentError;
use crate::health_agent::HealthAgent;
use crate::reminder_agent::ReminderAgent;
use crate::safety_agent::SafetyAgent;

// ---------------------------------------------------------------------------
// Records and outcomes
// ---------------------------------------------------------------------------

/// One inbound telemetry record, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryRecord {
    /// Vital signs for the health agent.
    Health(HealthReading),
    /// Motion data for the safety agent.
    Safety(SafetyReading),
    /// A reminder check for the reminder agent.
    Reminders(ReminderCheck),
}

/// Result of one successful detection pass, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionReport {
    /// See [`HealthReport`].
    Health(HealthReport),
    /// See [`SafetyReport`].
    Safety(SafetyReport),
    /// See [`ReminderReport`].
    Reminders(ReminderReport),
}

impl DetectionReport {
    /// Alerts raised by the pass.
    pub fn alerts(&self) -> &[Alert] {
        match self {
            Self::Health(r) => &r.alerts,
            Self::Safety(r) => &r.alerts,
            Self::Reminders(r) => &r.alerts,
        }
    }

    /// Overall status of the pass.
    pub const fn status(&self) -> ReportStatus {
        match self {
            Self::Health(r) => r.status,
            Self::Safety(r) => r.status,
            Self::Reminders(r) => r.status,
        }
    }
}

/// Per-record result of a batch, tagged by `outcome`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Detection ran.
    Ok(DetectionReport),
    /// The record was rejected.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

impl RecordOutcome {
    /// An error outcome for a record that could not be processed.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// The report, if detection ran.
    pub const fn report(&self) -> Option<&DetectionReport> {
        match self {
            Self::Ok(report) => Some(report),
            Self::Error { .. } => None,
        }
    }
}

/// Counts from narrating a set of alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NarrationSummary {
    /// Alerts for which narration was attempted.
    pub attempted: usize,
    /// Alerts whose message was logged.
    pub handled: usize,
    /// Alerts whose narration failed.
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

/// One agent per detection domain.
#[derive(Debug)]
pub struct CareMonitor {
    health: HealthAgent,
    safety: SafetyAgent,
    reminders: ReminderAgent,
}

impl CareMonitor {
    /// Validate `config` and build the three agents.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidConfig`] if validation fails.
    pub fn new(config: &MonitoringConfig) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            health: HealthAgent::new(config),
            safety: SafetyAgent::new(config),
            reminders: ReminderAgent::new(config),
        })
    }

    /// Build from pre-constructed agents.
    pub const fn from_agents(
        health: HealthAgent,
        safety: SafetyAgent,
        reminders: ReminderAgent,
    ) -> Self {
        Self {
            health,
            safety,
            reminders,
        }
    }

    /// The health agent.
    pub const fn health(&self) -> &HealthAgent {
        &self.health
    }

    /// The safety agent.
    pub const fn safety(&self) -> &SafetyAgent {
        &self.safety
    }

    /// The reminder agent.
    pub const fn reminders(&self) -> &ReminderAgent {
        &self.reminders
    }

    /// Route one record to its agent.
    ///
    /// # Errors
    ///
    /// Whatever the agent rejects the record with.
    pub fn process(&self, record: &TelemetryRecord) -> Result<DetectionReport, AgentError> {
        match record {
            TelemetryRecord::Health(reading) => {
                self.health.process_health(reading).map(DetectionReport::Health)
            }
            TelemetryRecord::Safety(reading) => {
                self.safety.process_safety(reading).map(DetectionReport::Safety)
            }
            TelemetryRecord::Reminders(check) => {
                self.reminders.process_reminders(check).map(DetectionReport::Reminders)
            }
        }
    }

    /// Like [`Self::process`], folding the error into the outcome.
    pub fn process_outcome(&self, record: &TelemetryRecord) -> RecordOutcome {
        match self.process(record) {
            Ok(report) => RecordOutcome::Ok(report),
            Err(err) => RecordOutcome::failed(err.to_string()),
        }
    }

    /// Process every record independently, in input order.
    pub fn process_batch(&self, records: &[TelemetryRecord]) -> Vec<RecordOutcome> {
        let outcomes: Vec<RecordOutcome> =
            records.iter().map(|r| self.process_outcome(r)).collect();
        let failed = outcomes.iter().filter(|o| o.report().is_none()).count();
        tracing::debug!(records = records.len(), failed, "Processed telemetry batch");
        outcomes
    }

    /// Run the handling cycle for `alert` on the agent that owns its
    /// domain.
    pub async fn handle_alert(&self, narrator: &Narrator, alert: &Alert) -> bool {
        match alert.domain() {
            AgentType::HealthMonitor => self.health.handle_alert(narrator, alert).await,
            AgentType::SafetyMonitor => self.safety.handle_alert(narrator, alert).await,
            AgentType::ReminderAgent => self.reminders.handle_alert(narrator, alert).await,
        }
    }

    /// Narrate every alert in the successful outcomes, one at a time.
    pub async fn narrate_all(
        &self,
        narrator: &Narrator,
        outcomes: &[RecordOutcome],
    ) -> NarrationSummary {
        let mut results = Vec::new();
        for alert in outcomes
            .iter()
            .filter_map(RecordOutcome::report)
            .flat_map(DetectionReport::alerts)
        {
            results.push(self.handle_alert(narrator, alert).await);
        }
        let handled = results.iter().filter(|&&ok| ok).count();
        NarrationSummary {
            attempted: results.len(),
            handled,
            failed: results.len().saturating_sub(handled),
        }
    }

    /// Identity of each agent, health first.
    pub fn status(&self) -> Vec<AgentIdentity> {
        vec![
            self.health.identity(),
            self.safety.identity(),
            self.reminders.identity(),
        ]
    }
}

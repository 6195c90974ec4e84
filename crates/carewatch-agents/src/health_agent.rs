//! The health monitoring agent.

use std::collections::BTreeMap;

use carewatch_narrator::Narrator;
use carewatch_types::{
    AgentType, Alert, HealthReading, HealthReport, ReportStatus, Threshold, parse_timestamp,
};

use crate::activity::ActivityLog;
use crate::agent::{AgentIdentity, MonitoringAgent};
use crate::config::MonitoringConfig;
use crate::detection::detect_health;
use crate::error::AgentError;
use crate::handling;

/// Checks vital signs against per-metric thresholds.
///
/// Holds no mutable detection state; the threshold table is fixed at
/// construction.
#[derive(Debug)]
pub struct HealthAgent {
    identity: AgentIdentity,
    activity: ActivityLog,
    thresholds: BTreeMap<String, Threshold>,
}

impl HealthAgent {
    /// Create an agent using the thresholds from `config`.
    pub fn new(config: &MonitoringConfig) -> Self {
        let identity = AgentIdentity::new(AgentType::HealthMonitor);
        Self {
            identity,
            activity: ActivityLog::new(identity),
            thresholds: config.health_thresholds.clone(),
        }
    }

    /// The threshold table in use.
    pub const fn thresholds(&self) -> &BTreeMap<String, Threshold> {
        &self.thresholds
    }

    /// Run health detection on one reading.
    ///
    /// Every alert is also written to the activity log at `warning`. A
    /// severity computation failure is logged at `error` and the alert is
    /// kept at `high`.
    ///
    /// # Errors
    ///
    /// Fails on a missing or malformed timestamp or a non-finite metric.
    pub fn process_health(&self, reading: &HealthReading) -> Result<HealthReport, AgentError> {
        let result = parse_timestamp("timestamp", &reading.timestamp)
            .map_err(AgentError::from)
            .and_then(|ts| detect_health(&reading.metrics, &self.thresholds, ts));
        let findings = match result {
            Ok(findings) => findings,
            Err(err) => {
                self.activity.error(format!("Rejected health reading: {err}"));
                return Err(err);
            }
        };

        let mut alerts = Vec::with_capacity(findings.len());
        for finding in findings {
            if let Some(err) = finding.severity_error {
                self.activity.error(format!("Severity computation failed: {err}"));
            }
            if let Alert::HealthThreshold(ref a) = finding.alert {
                self.activity.warning(format!(
                    "Health threshold exceeded: {}={} outside [{}, {}] (severity {})",
                    a.metric, a.value, a.threshold.min, a.threshold.max, a.severity
                ));
            }
            alerts.push(finding.alert);
        }

        Ok(HealthReport {
            status: ReportStatus::from_alert_count(alerts.len()),
            alerts,
            data: reading.metrics.clone(),
        })
    }

    /// Narrate and log one health alert. See [`handling::handle_alert`].
    pub async fn handle_alert(&self, narrator: &Narrator, alert: &Alert) -> bool {
        handling::handle_alert(self, narrator, alert).await
    }
}

impl MonitoringAgent for HealthAgent {
    fn identity(&self) -> AgentIdentity {
        self.identity
    }

    fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use carewatch_types::{ActivityLevel, Severity};

    use super::*;

    fn reading(pairs: &[(&str, f64)]) -> HealthReading {
        HealthReading {
            timestamp: "2024-05-01T09:30:00".to_owned(),
            metrics: pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect(),
        }
    }

    #[test]
    fn normal_reading() {
        let agent = HealthAgent::new(&MonitoringConfig::default());
        let report = agent
            .process_health(&reading(&[("heart_rate", 72.0), ("glucose_level", 95.0)]))
            .unwrap();
        assert_eq!(report.status, ReportStatus::Normal);
        assert!(report.alerts.is_empty());
        assert_eq!(report.data.len(), 2);
        assert!(agent.activity().is_empty());
    }

    #[test]
    fn elevated_heart_rate_alerts() {
        let agent = HealthAgent::new(&MonitoringConfig::default());
        let report = agent.process_health(&reading(&[("heart_rate", 130.0)])).unwrap();
        assert_eq!(report.status, ReportStatus::Alert);
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts.first().map(Alert::severity), Some(Severity::Medium));

        let warnings = agent.activity().entries_at(ActivityLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings.first().unwrap().message.contains("heart_rate=130"));
    }

    #[test]
    fn zero_bound_logs_error_and_keeps_high_alert() {
        let mut config = MonitoringConfig::default();
        config
            .health_thresholds
            .insert("tremor_index".to_owned(), Threshold { min: 0.0, max: 0.0 });
        let agent = HealthAgent::new(&config);

        let report = agent.process_health(&reading(&[("tremor_index", 0.4)])).unwrap();
        assert_eq!(report.status, ReportStatus::Alert);
        assert_eq!(report.alerts.first().map(Alert::severity), Some(Severity::High));

        let errors = agent.activity().entries_at(ActivityLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors.first().unwrap().message.contains("threshold max is zero"));
        assert_eq!(agent.activity().entries_at(ActivityLevel::Warning).len(), 1);
    }

    #[test]
    fn untracked_non_finite_metric_does_not_hide_breach() {
        let agent = HealthAgent::new(&MonitoringConfig::default());
        let report = agent
            .process_health(&reading(&[("heart_rate", 130.0), ("step_count", f64::NAN)]))
            .unwrap();
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts.first().map(Alert::severity), Some(Severity::Medium));
        assert!(agent.activity().entries_at(ActivityLevel::Error).is_empty());
    }

    #[test]
    fn missing_timestamp_is_rejected_and_logged() {
        let agent = HealthAgent::new(&MonitoringConfig::default());
        let mut bad = reading(&[("heart_rate", 72.0)]);
        bad.timestamp.clear();
        assert_eq!(
            agent.process_health(&bad),
            Err(AgentError::MissingField { field: "timestamp" })
        );
        assert_eq!(agent.activity().entries_at(ActivityLevel::Error).len(), 1);
    }
}

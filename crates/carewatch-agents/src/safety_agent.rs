//! The safety monitoring agent: falls and prolonged inactivity.

use std::sync::Mutex;

use carewatch_narrator::Narrator;
use carewatch_types::{
    AgentType, Alert, ReportStatus, SafetyReading, SafetyReport, parse_timestamp,
};
use chrono::{Local, NaiveDateTime, TimeDelta};

use crate::activity::ActivityLog;
use crate::agent::{AgentIdentity, MonitoringAgent, lock};
use crate::config::MonitoringConfig;
use crate::detection::{detect_fall, detect_inactivity};
use crate::error::AgentError;
use crate::handling;

/// Tracks the last time movement was seen and flags falls.
#[derive(Debug)]
pub struct SafetyAgent {
    identity: AgentIdentity,
    activity: ActivityLog,
    fall_sensitivity: f64,
    inactivity_threshold: TimeDelta,
    /// Wall-clock time of the most recent movement. Never moves backwards.
    last_movement: Mutex<NaiveDateTime>,
}

impl SafetyAgent {
    /// Create an agent whose movement baseline is the current local time.
    pub fn new(config: &MonitoringConfig) -> Self {
        Self::with_baseline(config, Local::now().naive_local())
    }

    /// Create an agent with an explicit movement baseline.
    pub fn with_baseline(config: &MonitoringConfig, last_movement: NaiveDateTime) -> Self {
        let identity = AgentIdentity::new(AgentType::SafetyMonitor);
        Self {
            identity,
            activity: ActivityLog::new(identity),
            fall_sensitivity: config.fall_detection_sensitivity,
            inactivity_threshold: config.inactivity_threshold(),
            last_movement: Mutex::new(last_movement),
        }
    }

    /// Current movement baseline.
    pub fn last_movement(&self) -> NaiveDateTime {
        *lock(&self.last_movement)
    }

    /// Run fall and inactivity detection on one reading.
    ///
    /// Inactivity is measured against the baseline as it stood before this
    /// reading. Reading the baseline, checking it, and advancing it happen
    /// under one lock so concurrent readings cannot lose an update.
    ///
    /// # Errors
    ///
    /// Fails on a missing or malformed timestamp or a non-finite
    /// acceleration component. The baseline is left untouched.
    pub fn process_safety(&self, reading: &SafetyReading) -> Result<SafetyReport, AgentError> {
        let (timestamp, fall) = match self.validate(reading) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.activity.error(format!("Rejected safety reading: {err}"));
                return Err(err);
            }
        };

        let (inactivity, last_movement) = {
            let mut baseline = lock(&self.last_movement);
            let inactivity = detect_inactivity(*baseline, timestamp, self.inactivity_threshold);
            if reading.movement_detected && timestamp > *baseline {
                *baseline = timestamp;
            }
            (inactivity, *baseline)
        };

        let alerts: Vec<Alert> = fall.into_iter().chain(inactivity).collect();
        for alert in &alerts {
            match alert {
                Alert::FallDetected(a) => self.activity.warning(format!(
                    "Potential fall detected: magnitude {:.2} (x={}, y={}, z={})",
                    a.magnitude, a.acceleration_data.x, a.acceleration_data.y, a.acceleration_data.z
                )),
                Alert::Inactivity(a) => self.activity.warning(format!(
                    "No movement for {:.1} minutes",
                    a.duration_minutes
                )),
                _ => {}
            }
        }

        Ok(SafetyReport {
            status: ReportStatus::from_alert_count(alerts.len()),
            alerts,
            last_movement,
        })
    }

    /// Narrate and log one safety alert. See [`handling::handle_alert`].
    pub async fn handle_alert(&self, narrator: &Narrator, alert: &Alert) -> bool {
        handling::handle_alert(self, narrator, alert).await
    }

    fn validate(
        &self,
        reading: &SafetyReading,
    ) -> Result<(NaiveDateTime, Option<Alert>), AgentError> {
        let timestamp = parse_timestamp("timestamp", &reading.timestamp)?;
        let fall = match &reading.acceleration {
            Some(acceleration) => detect_fall(acceleration, self.fall_sensitivity, timestamp)?,
            None => None,
        };
        Ok((timestamp, fall))
    }
}

impl MonitoringAgent for SafetyAgent {
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
    use carewatch_types::{Acceleration, Severity};
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn reading(ts: &str, movement: bool, acceleration: Option<Acceleration>) -> SafetyReading {
        SafetyReading {
            acceleration,
            movement_detected: movement,
            timestamp: ts.to_owned(),
        }
    }

    #[test]
    fn fall_and_inactivity_fire_together() {
        let agent = SafetyAgent::with_baseline(&MonitoringConfig::default(), at(6, 0));
        let accel = Acceleration { x: 20.0, y: 20.0, z: 20.0 };
        let report = agent
            .process_safety(&reading("2024-05-01T09:00:00", true, Some(accel)))
            .unwrap();

        assert_eq!(report.status, ReportStatus::Alert);
        let kinds: Vec<_> = report.alerts.iter().map(Alert::kind).collect();
        assert_eq!(kinds, vec!["fall_detected", "inactivity"]);
        assert_eq!(report.alerts.first().map(Alert::severity), Some(Severity::High));
        assert_eq!(report.last_movement, at(9, 0));
    }

    #[test]
    fn inactivity_uses_pre_update_baseline() {
        let agent = SafetyAgent::with_baseline(&MonitoringConfig::default(), at(6, 0));
        let report = agent.process_safety(&reading("2024-05-01T08:30", true, None)).unwrap();
        match report.alerts.as_slice() {
            [Alert::Inactivity(a)] => assert!((a.duration_minutes - 150.0).abs() < 1e-9),
            other => panic!("unexpected alerts {other:?}"),
        }
        assert_eq!(agent.last_movement(), at(8, 30));

        let report = agent.process_safety(&reading("2024-05-01T09:00", false, None)).unwrap();
        assert!(report.alerts.is_empty());
        assert_eq!(report.last_movement, at(8, 30));
    }

    #[test]
    fn baseline_never_moves_backwards() {
        let agent = SafetyAgent::with_baseline(&MonitoringConfig::default(), at(10, 0));
        let report = agent.process_safety(&reading("2024-05-01T09:00", true, None)).unwrap();
        assert_eq!(report.last_movement, at(10, 0));
    }

    #[test]
    fn invalid_reading_leaves_state_alone() {
        let agent = SafetyAgent::with_baseline(&MonitoringConfig::default(), at(6, 0));
        let bad = reading(
            "2024-05-01T09:00",
            true,
            Some(Acceleration { x: f64::NAN, y: 0.0, z: 0.0 }),
        );
        assert!(matches!(
            agent.process_safety(&bad),
            Err(AgentError::NonFiniteValue { .. })
        ));
        assert_eq!(agent.last_movement(), at(6, 0));

        assert!(matches!(
            agent.process_safety(&reading("yesterday", true, None)),
            Err(AgentError::InvalidTimestamp { .. })
        ));
    }
}

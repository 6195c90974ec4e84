//! End-to-end detection and handling scenarios.
//!
//! Each test drives the public API the way the engine binary does:
//! tagged telemetry in, reports and activity-log entries out. Narration
//! uses the stub backend or a deliberately unreachable HTTP endpoint, so
//! no external service is needed.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::sync::Arc;
use std::thread;

use carewatch_agents::{
    CareMonitor, DetectionReport, HealthAgent, MonitoringAgent, MonitoringConfig, RecordOutcome,
    ReminderAgent, SafetyAgent, TelemetryRecord,
};
use carewatch_narrator::{BackendType, NarrationConfig, Narrator};
use carewatch_types::{ActivityLevel, Alert, AgentType, ReportStatus, SafetyReading, Severity};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

fn monitor_with_baseline(baseline: NaiveDateTime) -> CareMonitor {
    let config = MonitoringConfig::default();
    CareMonitor::from_agents(
        HealthAgent::new(&config),
        SafetyAgent::with_baseline(&config, baseline),
        ReminderAgent::new(&config),
    )
}

fn record(json: &str) -> TelemetryRecord {
    serde_json::from_str(json).unwrap()
}

async fn unreachable_narrator() -> Narrator {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = NarrationConfig {
        backend: BackendType::Ollama,
        api_url: format!("http://{addr}"),
        request_timeout_ms: 2_000,
        ..NarrationConfig::default()
    };
    Narrator::from_config(&config).unwrap()
}

// ---------------------------------------------------------------------------
// Detection through the monitor
// ---------------------------------------------------------------------------

#[test]
fn heart_rate_scenario() {
    let monitor = monitor_with_baseline(at(9, 0));
    let report = monitor
        .process(&record(
            r#"{"kind": "health", "timestamp": "2024-05-01T09:30:00",
                "metrics": {"heart_rate": 130}}"#,
        ))
        .unwrap();

    assert_eq!(report.status(), ReportStatus::Alert);
    match report.alerts() {
        [Alert::HealthThreshold(a)] => {
            assert_eq!(a.metric, "heart_rate");
            assert_eq!(a.severity, Severity::Medium);
        }
        other => panic!("unexpected alerts {other:?}"),
    }
}

#[test]
fn fall_scenario() {
    let monitor = monitor_with_baseline(at(9, 0));
    let report = monitor
        .process(&record(
            r#"{"kind": "safety", "timestamp": "2024-05-01T09:05:00",
                "movement_detected": true,
                "acceleration": {"x": 20, "y": 20, "z": 20}}"#,
        ))
        .unwrap();

    match &report {
        DetectionReport::Safety(safety) => {
            assert_eq!(safety.alerts.len(), 1);
            assert_eq!(safety.last_movement, at(9, 5));
        }
        other => panic!("unexpected report {other:?}"),
    }
    assert_eq!(report.alerts().first().map(Alert::severity), Some(Severity::High));
}

#[test]
fn daily_check_scenario() {
    let monitor = monitor_with_baseline(at(7, 0));
    let report = monitor
        .process(&record(
            r#"{"kind": "reminders", "current_time": "2024-05-01T08:00:00", "reminders": []}"#,
        ))
        .unwrap();

    match report.alerts() {
        [Alert::DailyCheck(a)] => {
            assert_eq!(a.check_time, "08:00");
            assert_eq!(a.severity, Severity::Low);
        }
        other => panic!("unexpected alerts {other:?}"),
    }
}

#[test]
fn batch_isolates_failures_and_keeps_order() {
    let monitor = monitor_with_baseline(at(9, 0));
    let records = vec![
        record(r#"{"kind": "health", "timestamp": "", "metrics": {"heart_rate": 72}}"#),
        record(
            r#"{"kind": "health", "timestamp": "2024-05-01T09:30", "metrics": {"heart_rate": 72}}"#,
        ),
        record(r#"{"kind": "reminders", "current_time": "not a time"}"#),
        record(r#"{"kind": "safety", "timestamp": "2024-05-01T09:31", "movement_detected": true}"#),
    ];

    let outcomes = monitor.process_batch(&records);
    let ok: Vec<bool> = outcomes.iter().map(|o| o.report().is_some()).collect();
    assert_eq!(ok, vec![false, true, false, true]);

    match outcomes.first().unwrap() {
        RecordOutcome::Error { message } => assert!(message.contains("timestamp")),
        RecordOutcome::Ok(_) => panic!("expected an error outcome"),
    }
    assert_eq!(monitor.safety().last_movement(), at(9, 31));
}

#[test]
fn outcomes_serialize_with_tags() {
    let monitor = monitor_with_baseline(at(9, 0));
    let outcome = monitor.process_outcome(&record(
        r#"{"kind": "health", "timestamp": "2024-05-01T09:30", "metrics": {"glucose_level": 250}}"#,
    ));
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["outcome"], "ok");
    assert_eq!(json["kind"], "health");
    assert_eq!(json["status"], "alert");
    assert_eq!(json["alerts"][0]["type"], "health_threshold");
    assert_eq!(json["alerts"][0]["severity"], "medium");
}

#[test]
fn status_lists_one_agent_per_domain() {
    let monitor = CareMonitor::new(&MonitoringConfig::default()).unwrap();
    let types: Vec<AgentType> = monitor.status().iter().map(|i| i.agent_type).collect();
    assert_eq!(
        types,
        vec![AgentType::HealthMonitor, AgentType::SafetyMonitor, AgentType::ReminderAgent]
    );
}

#[test]
fn invalid_config_is_rejected() {
    let config = MonitoringConfig {
        fall_detection_sensitivity: -1.0,
        ..MonitoringConfig::default()
    };
    assert!(CareMonitor::new(&config).is_err());
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_movement_updates_are_not_lost() {
    let start = at(0, 0);
    let agent = Arc::new(SafetyAgent::with_baseline(&MonitoringConfig::default(), start));

    let handles: Vec<_> = (0..8_i64)
        .map(|worker| {
            let agent = Arc::clone(&agent);
            thread::spawn(move || {
                for step in 0..50_i64 {
                    let ts = start + TimeDelta::seconds(worker * 1_000 + step);
                    let reading = SafetyReading {
                        acceleration: None,
                        movement_detected: true,
                        timestamp: ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    };
                    agent.process_safety(&reading).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // The latest reading any worker produced must be the baseline.
    assert_eq!(agent.last_movement(), start + TimeDelta::seconds(7 * 1_000 + 49));
}

// ---------------------------------------------------------------------------
// Alert handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn handle_alert_logs_narrated_message() {
    let monitor = monitor_with_baseline(at(9, 0));
    let narrator = Narrator::stub("Heart rate is elevated.").unwrap();
    let report = monitor
        .process(&record(
            r#"{"kind": "health", "timestamp": "2024-05-01T09:30",
                "metrics": {"heart_rate": 130}}"#,
        ))
        .unwrap();

    let alert = report.alerts().first().unwrap();
    assert!(monitor.handle_alert(&narrator, alert).await);

    let warnings = monitor.health().activity().entries_at(ActivityLevel::Warning);
    assert_eq!(
        warnings.last().map(|e| e.message.as_str()),
        Some("Health Alert: Heart rate is elevated.")
    );
}

#[tokio::test]
async fn high_severity_message_is_logged_at_error() {
    let monitor = monitor_with_baseline(at(9, 0));
    let narrator = Narrator::stub("Possible fall.").unwrap();
    let report = monitor
        .process(&record(
            r#"{"kind": "safety", "timestamp": "2024-05-01T09:05",
                "acceleration": {"x": 30, "y": 30, "z": 0}}"#,
        ))
        .unwrap();

    let alert = report.alerts().first().unwrap();
    assert!(monitor.safety().handle_alert(&narrator, alert).await);
    let errors = monitor.safety().activity().entries_at(ActivityLevel::Error);
    assert_eq!(
        errors.last().map(|e| e.message.as_str()),
        Some("Safety Alert: Possible fall.")
    );
}

#[tokio::test]
async fn unreachable_narrator_returns_false() {
    let monitor = monitor_with_baseline(at(9, 0));
    let narrator = unreachable_narrator().await;
    let alert = Alert::inactivity(150.0, at(11, 30));

    assert!(!monitor.handle_alert(&narrator, &alert).await);
    let errors = monitor.safety().activity().entries_at(ActivityLevel::Error);
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn foreign_alert_is_refused() {
    let monitor = monitor_with_baseline(at(9, 0));
    let narrator = Narrator::stub("unused").unwrap();
    let alert = Alert::daily_check("08:00".to_owned(), at(8, 0));

    assert!(!monitor.health().handle_alert(&narrator, &alert).await);
    assert_eq!(monitor.health().activity().entries_at(ActivityLevel::Error).len(), 1);
    assert!(monitor.reminders().activity().is_empty());
}

#[tokio::test]
async fn narrate_all_counts_results() {
    let monitor = monitor_with_baseline(at(9, 0));
    let records = vec![
        record(
            r#"{"kind": "health", "timestamp": "2024-05-01T09:30",
                "metrics": {"heart_rate": 130, "glucose_level": 40}}"#,
        ),
        record(r#"{"kind": "health", "timestamp": ""}"#),
        record(r#"{"kind": "reminders", "current_time": "2024-05-01T12:00"}"#),
    ];
    let outcomes = monitor.process_batch(&records);

    let narrator = Narrator::stub("Please check in.").unwrap();
    let summary = monitor.narrate_all(&narrator, &outcomes).await;
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.handled, 3);
    assert_eq!(summary.failed, 0);
}

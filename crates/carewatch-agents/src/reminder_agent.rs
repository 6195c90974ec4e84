//! The reminder agent and its schedule.

use std::sync::Mutex;

use carewatch_narrator::Narrator;
use carewatch_types::{
    Alert, AgentType, PendingReminder, Reminder, ReminderCheck, ReminderId, ReminderReport,
    ReportStatus, parse_timestamp,
};
use chrono::{Local, NaiveDateTime, TimeDelta};

use crate::activity::ActivityLog;
use crate::agent::{AgentIdentity, MonitoringAgent, lock};
use crate::config::MonitoringConfig;
use crate::detection::detect_reminders;
use crate::error::AgentError;
use crate::handling;

/// Owns the scheduled reminders and evaluates them on request.
///
/// There is no background timer: reminders only fire when a caller runs
/// detection with a current time.
#[derive(Debug)]
pub struct ReminderAgent {
    identity: AgentIdentity,
    activity: ActivityLog,
    advance_notice: TimeDelta,
    daily_times: Vec<String>,
    scheduled: Mutex<Vec<Reminder>>,
}

impl ReminderAgent {
    /// Create an agent with an empty schedule.
    pub fn new(config: &MonitoringConfig) -> Self {
        let identity = AgentIdentity::new(AgentType::ReminderAgent);
        Self {
            identity,
            activity: ActivityLog::new(identity),
            advance_notice: config.advance_notice(),
            daily_times: config.daily_reminder_times.clone(),
            scheduled: Mutex::new(Vec::new()),
        }
    }

    // -----------------------------------------------------------------------
    // Detection
    // -----------------------------------------------------------------------

    /// Evaluate a reminder check.
    ///
    /// Uses the inline reminders when the check carries them, otherwise a
    /// snapshot of the agent's own schedule.
    ///
    /// # Errors
    ///
    /// Fails on a missing or malformed `current_time`, or on an inline
    /// reminder with a blank activity or bad time.
    pub fn process_reminders(&self, check: &ReminderCheck) -> Result<ReminderReport, AgentError> {
        let parsed = parse_timestamp("current_time", &check.current_time)
            .map_err(AgentError::from)
            .and_then(|now| {
                let reminders = match &check.reminders {
                    Some(pending) => inline_reminders(pending, now)?,
                    None => self.scheduled_reminders(),
                };
                Ok((now, reminders))
            });

        match parsed {
            Ok((now, reminders)) => Ok(self.evaluate(&reminders, now)),
            Err(err) => {
                self.activity.error(format!("Rejected reminder check: {err}"));
                Err(err)
            }
        }
    }

    /// Evaluate the agent's own schedule at `now`.
    pub fn process_scheduled(&self, now: NaiveDateTime) -> ReminderReport {
        let snapshot = self.scheduled_reminders();
        self.evaluate(&snapshot, now)
    }

    fn evaluate(&self, reminders: &[Reminder], now: NaiveDateTime) -> ReminderReport {
        let scan = detect_reminders(reminders, now, self.advance_notice, &self.daily_times);
        for alert in &scan.alerts {
            match alert {
                Alert::UpcomingReminder(a) => self.activity.info(format!(
                    "Reminder due: {} at {}",
                    a.activity, a.scheduled_time
                )),
                Alert::DailyCheck(a) => {
                    self.activity.info(format!("Daily check-in at {}", a.check_time));
                }
                _ => {}
            }
        }
        ReminderReport {
            status: ReportStatus::from_alert_count(scan.alerts.len()),
            alerts: scan.alerts,
            upcoming_reminders: scan.upcoming,
        }
    }

    // -----------------------------------------------------------------------
    // Schedule
    // -----------------------------------------------------------------------

    /// Add a reminder to the schedule, returning it.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidReminder`] if `activity` is blank.
    pub fn schedule(&self, activity: &str, time: NaiveDateTime) -> Result<Reminder, AgentError> {
        let reminder = Reminder::new(activity, time, Local::now().naive_local()).ok_or_else(|| {
            AgentError::InvalidReminder {
                reason: "activity must not be blank".to_owned(),
            }
        })?;
        lock(&self.scheduled).push(reminder.clone());
        Ok(reminder)
    }

    /// Add a reminder to the schedule, logging the outcome.
    ///
    /// Returns `false` (and logs at `error`) when the reminder cannot be
    /// created.
    pub fn schedule_reminder(&self, activity: &str, time: NaiveDateTime) -> bool {
        match self.schedule(activity, time) {
            Ok(reminder) => {
                self.activity.info(format!(
                    "Scheduled reminder: {} at {}",
                    reminder.activity, reminder.scheduled_time
                ));
                true
            }
            Err(err) => {
                self.activity.error(format!("Failed to schedule reminder: {err}"));
                false
            }
        }
    }

    /// Snapshot of the schedule in insertion order.
    pub fn scheduled_reminders(&self) -> Vec<Reminder> {
        lock(&self.scheduled).clone()
    }

    /// Remove one reminder. Returns `false` if `id` is not scheduled.
    pub fn acknowledge_reminder(&self, id: ReminderId) -> bool {
        let removed = {
            let mut scheduled = lock(&self.scheduled);
            scheduled
                .iter()
                .position(|r| r.id == id)
                .map(|index| scheduled.remove(index))
        };
        match removed {
            Some(reminder) => {
                self.activity
                    .info(format!("Acknowledged reminder: {}", reminder.activity));
                true
            }
            None => false,
        }
    }

    /// Remove every reminder scheduled strictly before `cutoff`.
    ///
    /// Returns how many were removed.
    pub fn prune_before(&self, cutoff: NaiveDateTime) -> usize {
        let removed = {
            let mut scheduled = lock(&self.scheduled);
            let before = scheduled.len();
            scheduled.retain(|r| r.scheduled_time >= cutoff);
            before.saturating_sub(scheduled.len())
        };
        if removed > 0 {
            self.activity
                .info(format!("Pruned {removed} reminder(s) due before {cutoff}"));
        }
        removed
    }

    /// Narrate and log one reminder alert. See [`handling::handle_alert`].
    pub async fn handle_alert(&self, narrator: &Narrator, alert: &Alert) -> bool {
        handling::handle_alert(self, narrator, alert).await
    }
}

impl MonitoringAgent for ReminderAgent {
    fn identity(&self) -> AgentIdentity {
        self.identity
    }

    fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}

/// Turn inline reminders into [`Reminder`] records created at `now`.
fn inline_reminders(
    pending: &[PendingReminder],
    now: NaiveDateTime,
) -> Result<Vec<Reminder>, AgentError> {
    pending
        .iter()
        .map(|p| {
            let time = parse_timestamp("reminders.time", &p.time)?;
            Reminder::new(&p.activity, time, now).ok_or_else(|| AgentError::InvalidReminder {
                reason: "activity must not be blank".to_owned(),
            })
        })
        .collect()
}

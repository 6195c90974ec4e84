//! Reminder-window and daily check-in detection.

use carewatch_types::{Alert, Reminder, Severity, UpcomingReminderAlert, clock_hhmm};
use chrono::{NaiveDateTime, TimeDelta};

/// Outcome of one reminder pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReminderScan {
    /// Upcoming-reminder alerts (in input order), then at most one daily
    /// check-in alert.
    pub alerts: Vec<Alert>,
    /// Future reminders still outside the advance-notice window.
    pub upcoming: Vec<Reminder>,
}

/// Evaluate `reminders` and the daily check-in slots at `now`.
///
/// A reminder alerts when it is due within `advance_notice` (inclusive).
/// Overdue reminders alert too; they are never carried in
/// [`ReminderScan::upcoming`]. A daily check-in fires when `now`'s
/// `HH:MM` exactly equals a configured slot.
pub fn detect_reminders(
    reminders: &[Reminder],
    now: NaiveDateTime,
    advance_notice: TimeDelta,
    daily_times: &[String],
) -> ReminderScan {
    let mut scan = ReminderScan::default();

    for reminder in reminders {
        let until = reminder.scheduled_time.signed_duration_since(now);
        if until <= advance_notice {
            scan.alerts.push(Alert::UpcomingReminder(UpcomingReminderAlert {
                reminder_id: reminder.id,
                activity: reminder.activity.clone(),
                scheduled_time: reminder.scheduled_time,
                severity: Severity::Low,
                timestamp: now,
            }));
        } else if until > TimeDelta::zero() {
            scan.upcoming.push(reminder.clone());
        }
    }

    let clock = clock_hhmm(now);
    if let Some(slot) = daily_times.iter().find(|t| **t == clock) {
        scan.alerts.push(Alert::daily_check(slot.clone(), now));
    }

    scan
}

//! Scheduled reminder records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::ReminderId;

/// A reminder for one activity at one time.
///
/// Owned by the reminder agent's schedule once created; the same shape is
/// returned in `upcoming_reminders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Reminder {
    /// Unique reminder identifier.
    pub id: ReminderId,
    /// What the person should do (e.g. `"Take blood pressure medication"`).
    pub activity: String,
    /// When the activity is due.
    pub scheduled_time: NaiveDateTime,
    /// When the reminder was created.
    pub created_at: NaiveDateTime,
}

impl Reminder {
    /// Create a reminder with a fresh ID.
    ///
    /// Returns `None` if `activity` is blank.
    pub fn new(
        activity: &str,
        scheduled_time: NaiveDateTime,
        created_at: NaiveDateTime,
    ) -> Option<Self> {
        let activity = activity.trim();
        (!activity.is_empty()).then(|| Self {
            id: ReminderId::new(),
            activity: activity.to_owned(),
            scheduled_time,
            created_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn blank_activity_is_rejected() {
        assert!(Reminder::new("   ", at(9), at(8)).is_none());
    }

    #[test]
    fn activity_is_trimmed() {
        let reminder = Reminder::new("  Lunch ", at(12), at(8));
        assert_eq!(reminder.map(|r| r.activity).as_deref(), Some("Lunch"));
    }
}

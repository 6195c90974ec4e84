//! Pure detection passes, one per domain.
//!
//! Each function turns one reading plus configuration into zero or more
//! candidate alerts. None of them touch agent state or log anything; the
//! agents in [`crate::health_agent`], [`crate::safety_agent`], and
//! [`crate::reminder_agent`] own both.

pub mod health;
pub mod reminder;
pub mod safety;

pub use health::{HealthFinding, detect_health};
pub use reminder::{ReminderScan, detect_reminders};
pub use safety::{BASE_FALL_THRESHOLD, detect_fall, detect_inactivity, fall_threshold};

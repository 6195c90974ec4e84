//! Per-agent activity log.
//!
//! Every entry is kept in a bounded in-memory buffer and mirrored as a
//! `tracing` event carrying `agent_id` and `agent_type`, so operators see
//! the same stream in the process log that callers can read back here.

use std::collections::VecDeque;
use std::sync::Mutex;

use carewatch_types::ActivityLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::agent::{AgentIdentity, lock};

/// Maximum entries to keep per agent.
pub const MAX_ENTRIES: usize = 500;

/// One line in an agent's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Entry level.
    pub level: ActivityLevel,
    /// Free-form message.
    pub message: String,
}

/// Bounded, thread-safe activity log for one agent.
#[derive(Debug)]
pub struct ActivityLog {
    identity: AgentIdentity,
    entries: Mutex<VecDeque<ActivityEntry>>,
}

impl ActivityLog {
    /// Create an empty log for the given agent.
    pub const fn new(identity: AgentIdentity) -> Self {
        Self {
            identity,
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Append an entry and emit the matching `tracing` event.
    ///
    /// When the buffer exceeds [`MAX_ENTRIES`] the oldest entry is dropped.
    pub fn record(&self, level: ActivityLevel, message: impl Into<String>) {
        let message = message.into();
        let agent_id = self.identity.agent_id;
        let agent_type = self.identity.agent_type;

        match level {
            ActivityLevel::Info => {
                tracing::info!(%agent_id, %agent_type, "{message}");
            }
            ActivityLevel::Warning => {
                tracing::warn!(%agent_id, %agent_type, "{message}");
            }
            ActivityLevel::Error => {
                tracing::error!(%agent_id, %agent_type, "{message}");
            }
        }

        let mut entries = lock(&self.entries);
        entries.push_back(ActivityEntry {
            recorded_at: Utc::now(),
            level,
            message,
        });
        while entries.len() > MAX_ENTRIES {
            entries.pop_front();
        }
    }

    /// Record at `info`.
    pub fn info(&self, message: impl Into<String>) {
        self.record(ActivityLevel::Info, message);
    }

    /// Record at `warning`.
    pub fn warning(&self, message: impl Into<String>) {
        self.record(ActivityLevel::Warning, message);
    }

    /// Record at `error`.
    pub fn error(&self, message: impl Into<String>) {
        self.record(ActivityLevel::Error, message);
    }

    /// Snapshot of the retained entries, oldest first.
    pub fn entries(&self) -> Vec<ActivityEntry> {
        lock(&self.entries).iter().cloned().collect()
    }

    /// Retained entries at exactly `level`, oldest first.
    pub fn entries_at(&self, level: ActivityLevel) -> Vec<ActivityEntry> {
        lock(&self.entries)
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether no entries are retained.
    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use carewatch_types::AgentType;

    use super::*;

    fn log() -> ActivityLog {
        ActivityLog::new(AgentIdentity::new(AgentType::HealthMonitor))
    }

    #[test]
    fn entries_keep_insertion_order() {
        let log = log();
        log.info("first");
        log.warning("second");
        log.error("third");

        let entries = log.entries();
        let levels: Vec<_> = entries.iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![ActivityLevel::Info, ActivityLevel::Warning, ActivityLevel::Error]
        );
        assert_eq!(entries.first().map(|e| e.message.as_str()), Some("first"));
    }

    #[test]
    fn buffer_is_bounded() {
        let log = log();
        for i in 0..(MAX_ENTRIES + 10) {
            log.info(format!("entry {i}"));
        }
        assert_eq!(log.len(), MAX_ENTRIES);
        assert_eq!(
            log.entries().first().map(|e| e.message.clone()),
            Some("entry 10".to_owned())
        );
    }

    #[test]
    fn filter_by_level() {
        let log = log();
        log.info("a");
        log.error("b");
        log.error("c");
        assert_eq!(log.entries_at(ActivityLevel::Error).len(), 2);
        assert!(log.entries_at(ActivityLevel::Warning).is_empty());
    }
}

//! Agent identity and the contract shared by every monitoring agent.

use std::sync::{Mutex, MutexGuard, PoisonError};

use carewatch_types::{AgentId, AgentType};
use serde::Serialize;

use crate::activity::ActivityLog;

/// Stable identity of one agent instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentIdentity {
    /// Unique identifier, fixed for the process lifetime.
    pub agent_id: AgentId,
    /// Which detection domain the agent serves.
    pub agent_type: AgentType,
}

impl AgentIdentity {
    /// Create an identity with a fresh ID.
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            agent_id: AgentId::new(),
            agent_type,
        }
    }
}

/// Behavior shared by the health, safety, and reminder agents.
///
/// Detection entry points differ per domain and live on the concrete
/// types. What they share is an identity and an activity log, which is
/// all the alert handling cycle needs.
pub trait MonitoringAgent {
    /// The agent's identity.
    fn identity(&self) -> AgentIdentity;

    /// The agent's activity log.
    fn activity(&self) -> &ActivityLog;

    /// Human-readable label used as a prefix for narrated messages.
    fn alert_label(&self) -> &'static str {
        match self.identity().agent_type {
            AgentType::HealthMonitor => "Health Alert",
            AgentType::SafetyMonitor => "Safety Alert",
            AgentType::ReminderAgent => "Reminder",
        }
    }
}

/// Acquire a mutex, recovering the data if a previous holder panicked.
///
/// Agent state stays consistent across a panic because every critical
/// section writes at most one field as its last step.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_are_unique() {
        let a = AgentIdentity::new(AgentType::HealthMonitor);
        let b = AgentIdentity::new(AgentType::HealthMonitor);
        assert_ne!(a.agent_id, b.agent_id);
        assert_eq!(a.agent_type, b.agent_type);
    }
}

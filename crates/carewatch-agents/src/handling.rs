//! The alert handling cycle: narrate, log, report.

use carewatch_narrator::Narrator;
use carewatch_types::{ActivityLevel, Alert, Severity};

use crate::agent::MonitoringAgent;

/// Narrate `alert` and write the message to `agent`'s activity log.
///
/// The message is logged at `error` for high-severity alerts and at
/// `warning` otherwise, prefixed with the agent's label. Returns `true`
/// once the message is logged.
///
/// Returns `false`, after logging at `error`, when the alert belongs to
/// another agent's domain or the narrator fails or times out. The narrator
/// is called once; there is no retry.
pub async fn handle_alert<A>(agent: &A, narrator: &Narrator, alert: &Alert) -> bool
where
    A: MonitoringAgent + ?Sized,
{
    let agent_type = agent.identity().agent_type;
    if alert.domain() != agent_type {
        agent.activity().error(format!(
            "Cannot handle {} alert: not a {agent_type} alert",
            alert.kind()
        ));
        return false;
    }

    match narrator.narrate(alert).await {
        Ok(message) => {
            let level = if alert.severity() == Severity::High {
                ActivityLevel::Error
            } else {
                ActivityLevel::Warning
            };
            agent
                .activity()
                .record(level, format!("{}: {message}", agent.alert_label()));
            true
        }
        Err(err) => {
            agent.activity().error(format!(
                "Error handling {} alert: {err}",
                alert.kind()
            ));
            false
        }
    }
}

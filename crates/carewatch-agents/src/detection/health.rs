//! Health-threshold breach detection.

use std::collections::BTreeMap;

use carewatch_types::{Alert, HealthAlert, Severity, Threshold};
use chrono::NaiveDateTime;

use crate::error::{AgentError, SeverityError};
use crate::severity;

/// One out-of-range metric.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthFinding {
    /// The alert to raise.
    pub alert: Alert,
    /// Set when severity could not be computed; the alert then carries
    /// [`Severity::High`].
    pub severity_error: Option<SeverityError>,
}

/// Compare every metric that has a configured threshold.
///
/// Metrics without a threshold are ignored, whatever their value. Findings
/// come back in metric name order.
///
/// # Errors
///
/// [`AgentError::NonFiniteValue`] if a metric with a threshold is NaN or
/// infinite. No findings are returned in that case.
pub fn detect_health(
    metrics: &BTreeMap<String, f64>,
    thresholds: &BTreeMap<String, Threshold>,
    timestamp: NaiveDateTime,
) -> Result<Vec<HealthFinding>, AgentError> {
    let tracked: Vec<(&String, f64, &Threshold)> = metrics
        .iter()
        .filter_map(|(metric, &value)| Some((metric, value, thresholds.get(metric)?)))
        .collect();

    if let Some((metric, _, _)) = tracked.iter().find(|(_, v, _)| !v.is_finite()) {
        return Err(AgentError::NonFiniteValue {
            metric: (*metric).clone(),
        });
    }

    let findings = tracked
        .into_iter()
        .filter(|(_, value, threshold)| !threshold.contains(*value))
        .map(|(metric, value, threshold)| {
            let (severity, severity_error) = match severity::classify(value, threshold) {
                Ok(severity) => (severity, None),
                Err(err) => (Severity::High, Some(err)),
            };
            HealthFinding {
                alert: Alert::HealthThreshold(HealthAlert {
                    metric: metric.clone(),
                    value,
                    threshold: *threshold,
                    severity,
                    timestamp,
                }),
                severity_error,
            }
        })
        .collect();

    Ok(findings)
}

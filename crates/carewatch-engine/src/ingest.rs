//! Newline-delimited JSON telemetry in, one JSON outcome per line out.

use std::io::{BufRead, Write};

use carewatch_agents::{CareMonitor, RecordOutcome, TelemetryRecord};

use crate::error::EngineError;

/// Parse one input line into a telemetry record.
///
/// Returns `None` for blank lines.
pub fn parse_line(line: &str) -> Option<Result<TelemetryRecord, serde_json::Error>> {
    let line = line.trim();
    (!line.is_empty()).then(|| serde_json::from_str(line))
}

/// Run every line of `input` through `monitor`, in order.
///
/// A line that is not a valid record becomes an error outcome in its
/// position; it does not stop the run.
pub fn process_lines<R: BufRead>(
    monitor: &CareMonitor,
    input: R,
    source: &str,
) -> Result<Vec<RecordOutcome>, EngineError> {
    let mut outcomes = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(|source_err| EngineError::Io {
            target: source.to_owned(),
            source: source_err,
        })?;
        let outcome = match parse_line(&line) {
            None => continue,
            Some(Ok(record)) => monitor.process_outcome(&record),
            Some(Err(err)) => {
                tracing::warn!(
                    line = index.saturating_add(1),
                    error = %err,
                    "Malformed telemetry record"
                );
                RecordOutcome::failed(format!("malformed record: {err}"))
            }
        };
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Write each outcome as one JSON line.
pub fn write_outcomes<W: Write>(mut out: W, outcomes: &[RecordOutcome]) -> Result<(), EngineError> {
    let io_err = |source| EngineError::Io {
        target: "stdout".to_owned(),
        source,
    };
    for outcome in outcomes {
        let line = serde_json::to_string(outcome)?;
        writeln!(out, "{line}").map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

//! Carewatch engine binary.
//!
//! Reads newline-delimited JSON telemetry from a file (first argument) or
//! stdin, runs every record through the monitoring agents, and writes one
//! JSON outcome per line to stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `carewatch-config.yaml` (or `CAREWATCH_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the care monitor (health, safety, reminder agents)
//! 4. Build the narrator when `--narrate` is given
//! 5. Process the telemetry batch and write outcomes
//! 6. Narrate every alert, if requested
//!
//! # Usage
//!
//! ```text
//! carewatch-engine [--narrate] [TELEMETRY.ndjson]
//! ```

mod config;
mod error;
mod ingest;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use carewatch_agents::CareMonitor;
use carewatch_narrator::Narrator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CareConfig, LoggingConfig};
use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "carewatch-config.yaml";

/// Parsed command-line arguments.
#[derive(Debug, Default)]
struct Args {
    narrate: bool,
    input: Option<PathBuf>,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_str() {
                "--narrate" => parsed.narrate = true,
                flag if flag.starts_with("--") => anyhow::bail!("unknown flag: {flag}"),
                path => {
                    if parsed.input.is_some() {
                        anyhow::bail!("only one input file may be given");
                    }
                    parsed.input = Some(PathBuf::from(path));
                }
            }
        }
        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;

    // 1. Load configuration.
    let config = load_config().context("loading configuration")?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        backend = config.narration.backend.as_str(),
        thresholds = config.monitoring.health_thresholds.len(),
        inactivity_threshold_minutes = config.monitoring.inactivity_threshold_minutes,
        "carewatch-engine starting"
    );

    // 3. Build the monitor.
    let monitor = CareMonitor::new(&config.monitoring).map_err(EngineError::from)?;
    for identity in monitor.status() {
        info!(agent_id = %identity.agent_id, agent_type = %identity.agent_type, "Agent ready");
    }

    // 4. Build the narrator.
    let narrator = if args.narrate {
        Some(Narrator::from_config(&config.narration).map_err(EngineError::from)?)
    } else {
        None
    };

    // 5. Process telemetry.
    let outcomes = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| EngineError::Io {
                target: path.display().to_string(),
                source,
            })?;
            ingest::process_lines(&monitor, BufReader::new(file), &path.display().to_string())?
        }
        None => ingest::process_lines(&monitor, io::stdin().lock(), "stdin")?,
    };
    ingest::write_outcomes(io::stdout().lock(), &outcomes)?;

    let failed = outcomes.iter().filter(|o| o.report().is_none()).count();
    info!(records = outcomes.len(), failed, "Telemetry processed");

    // 6. Narrate.
    if let Some(narrator) = narrator {
        let summary = monitor.narrate_all(&narrator, &outcomes).await;
        info!(
            backend = narrator.backend_name(),
            attempted = summary.attempted,
            handled = summary.handled,
            failed = summary.failed,
            "Narration complete"
        );
    }

    Ok(())
}

/// Load configuration from `CAREWATCH_CONFIG` or the default path.
///
/// A missing default file means built-in defaults. A missing file named
/// explicitly by `CAREWATCH_CONFIG` is an error.
fn load_config() -> Result<CareConfig, EngineError> {
    if let Ok(explicit) = std::env::var("CAREWATCH_CONFIG") {
        return Ok(CareConfig::from_file(Path::new(&explicit))?);
    }
    let config_path = Path::new(DEFAULT_CONFIG_PATH);
    if config_path.exists() {
        Ok(CareConfig::from_file(config_path)?)
    } else {
        Ok(CareConfig::from_env()?)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

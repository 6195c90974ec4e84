//! Error types for the engine binary.

use carewatch_agents::AgentError;
use carewatch_narrator::NarrationError;

use crate::config::ConfigError;

/// Top-level error for the engine binary.
///
/// Only startup and I/O failures end up here. A bad telemetry record is
/// reported in its outcome line and never stops the run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The monitor could not be built.
    #[error("monitor error: {source}")]
    Monitor {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// The narrator could not be built.
    #[error("narration error: {source}")]
    Narration {
        /// The underlying narration error.
        #[from]
        source: NarrationError,
    },

    /// Reading telemetry or writing outcomes failed.
    #[error("I/O error on {target}: {source}")]
    Io {
        /// What was being read or written.
        target: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An outcome could not be serialized.
    #[error("failed to encode outcome: {source}")]
    Encode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

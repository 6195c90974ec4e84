//! Error types for the narration client.
//!
//! Every failure between "alert in" and "message out" is one of these.
//! Callers treat all of them as a failed narration; none of them abort
//! detection.

/// Errors that can occur while generating an alert message.
#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    /// The HTTP request could not be sent or the connection failed.
    #[error("narration request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("narration service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("narration response parse error: {0}")]
    Parse(String),

    /// The service returned only whitespace.
    #[error("narration service returned an empty message")]
    EmptyResponse,

    /// The service did not answer within the configured deadline.
    #[error("narration timed out after {timeout_ms}ms")]
    Timeout {
        /// The deadline in milliseconds.
        timeout_ms: u128,
    },

    /// A prompt template failed to load or render.
    #[error("template error: {0}")]
    Template(String),

    /// Narration configuration is invalid.
    #[error("narration config error: {0}")]
    Config(String),
}

//! Narration backend configuration.
//!
//! Deserialized from the `narration` section of the service config file.
//! The environment variables honoured by earlier Ollama-based deployments
//! still win over file values:
//!
//! - `OLLAMA_API_BASE` overrides `api_url`
//! - `OLLAMA_MODEL` overrides `model`
//! - `NARRATION_BACKEND` overrides `backend`
//! - `NARRATION_API_KEY` overrides `api_key`

use std::time::Duration;

use serde::Deserialize;

use crate::error::NarrationError;

/// Supported narration backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Native Ollama `/api/generate`.
    Ollama,
    /// `OpenAI`-compatible chat completions (`OpenAI`, `DeepSeek`, Ollama `/v1`).
    #[serde(alias = "deepseek")]
    OpenAi,
    /// Canned messages, no network I/O.
    #[serde(alias = "none", alias = "offline")]
    Stub,
}

impl BackendType {
    /// Lowercase name as used in config files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Stub => "stub",
        }
    }

    /// Parse a backend name as written in config or environment.
    pub fn parse(name: &str) -> Result<Self, NarrationError> {
        match name.trim().to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" | "deepseek" => Ok(Self::OpenAi),
            "stub" | "none" | "offline" => Ok(Self::Stub),
            other => Err(NarrationError::Config(format!(
                "unknown narration backend: {other}"
            ))),
        }
    }
}

/// Configuration for the narration collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NarrationConfig {
    /// Which backend to talk to.
    #[serde(default = "default_backend")]
    pub backend: BackendType,

    /// Base API URL (e.g. `http://localhost:11434`).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key; empty means no authentication header is sent.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request deadline in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional directory of `.j2` templates overriding the built-ins.
    #[serde(default)]
    pub templates_dir: Option<String>,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            api_url: default_api_url(),
            api_key: String::new(),
            model: default_model(),
            request_timeout_ms: default_request_timeout_ms(),
            templates_dir: None,
        }
    }
}

impl NarrationConfig {
    /// The request deadline as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`NarrationError::Config`] if `NARRATION_BACKEND` names an
    /// unknown backend.
    pub fn apply_env_overrides(&mut self) -> Result<(), NarrationError> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), NarrationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("OLLAMA_API_BASE") {
            self.api_url = val;
        }
        if let Some(val) = lookup("OLLAMA_MODEL") {
            self.model = val;
        }
        if let Some(val) = lookup("NARRATION_API_KEY") {
            self.api_key = val;
        }
        if let Some(val) = lookup("NARRATION_BACKEND") {
            self.backend = BackendType::parse(&val)?;
        }
        Ok(())
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), NarrationError> {
        if self.request_timeout_ms == 0 {
            return Err(NarrationError::Config(
                "request_timeout_ms must be greater than zero".to_owned(),
            ));
        }
        if self.backend != BackendType::Stub && self.api_url.trim().is_empty() {
            return Err(NarrationError::Config("api_url must not be empty".to_owned()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_backend() -> BackendType {
    BackendType::Ollama
}

fn default_api_url() -> String {
    "http://localhost:11434".to_owned()
}

fn default_model() -> String {
    "mistral".to_owned()
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

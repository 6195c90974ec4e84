//! Narration backend abstraction and implementations.
//!
//! Enum dispatch rather than trait objects: async methods are not
//! dyn-compatible, and the set of backends is closed. HTTP backends
//! speak to a text-generation service with `reqwest`; the stub backend
//! answers locally.

use crate::config::{BackendType, NarrationConfig};
use crate::error::NarrationError;
use crate::prompt::RenderedPrompt;

/// Sampling temperature sent to HTTP backends.
const TEMPERATURE: f64 = 0.7;

/// Upper bound on generated tokens for one alert message.
const MAX_TOKENS: u32 = 256;

/// Message returned by the stub backend unless overridden.
const DEFAULT_STUB_MESSAGE: &str =
    "Narration is disabled; see the structured alert for details.";

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// A backend that turns a prompt into a message.
#[derive(Debug)]
pub enum NarrationBackend {
    /// Native Ollama generate API.
    Ollama(OllamaBackend),
    /// `OpenAI`-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Fixed local response.
    Stub(StubBackend),
}

impl NarrationBackend {
    /// Send a prompt and return the raw response text.
    ///
    /// # Errors
    ///
    /// Returns [`NarrationError`] if the HTTP call fails or the response
    /// cannot be extracted.
    pub async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, NarrationError> {
        match self {
            Self::Ollama(backend) => backend.complete(prompt).await,
            Self::OpenAi(backend) => backend.complete(prompt).await,
            Self::Stub(backend) => Ok(backend.message.clone()),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Ollama(_) => "ollama",
            Self::OpenAi(_) => "openai-compatible",
            Self::Stub(_) => "stub",
        }
    }
}

// ---------------------------------------------------------------------------
// Ollama backend
// ---------------------------------------------------------------------------

/// Backend for Ollama's `POST {api_url}/api/generate`.
#[derive(Debug)]
pub struct OllamaBackend {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend.
    pub fn new(config: &NarrationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            model: config.model.clone(),
        }
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, NarrationError> {
        let url = format!("{}/api/generate", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "system": prompt.system,
            "prompt": prompt.user,
            "stream": false,
            "options": {
                "temperature": TEMPERATURE,
                "num_predict": MAX_TOKENS
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NarrationError::Request(format!("Ollama request failed: {e}")))?;

        let json = read_json(response, "Ollama").await?;
        extract_ollama_content(&json)
    }
}

/// Extract the generated text from an Ollama generate response.
fn extract_ollama_content(json: &serde_json::Value) -> Result<String, NarrationError> {
    json.get("response")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| NarrationError::Parse("Ollama response missing `response`".to_owned()))
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Backend for `OpenAI`-compatible chat completions APIs.
///
/// Sends requests to `{api_url}/chat/completions`.
#[derive(Debug)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    /// Create a new `OpenAI`-compatible backend.
    pub fn new(config: &NarrationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, NarrationError> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS
        });

        let mut request = self.client.post(&url).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NarrationError::Request(format!("OpenAI request failed: {e}")))?;

        let json = read_json(response, "OpenAI").await?;
        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, NarrationError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            NarrationError::Parse("OpenAI response missing choices[0].message.content".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Stub backend
// ---------------------------------------------------------------------------

/// Returns the same message for every prompt.
///
/// Used when no text-generation service is deployed and in tests.
#[derive(Debug, Clone)]
pub struct StubBackend {
    message: String,
}

impl StubBackend {
    /// Create a stub that always answers `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new(DEFAULT_STUB_MESSAGE)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Check the status and decode the body as JSON.
async fn read_json(
    response: reqwest::Response,
    service: &str,
) -> Result<serde_json::Value, NarrationError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(NarrationError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| NarrationError::Parse(format!("{service} response parse failed: {e}")))
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create a narration backend from configuration.
pub fn create_backend(config: &NarrationConfig) -> NarrationBackend {
    match config.backend {
        BackendType::Ollama => NarrationBackend::Ollama(OllamaBackend::new(config)),
        BackendType::OpenAi => NarrationBackend::OpenAi(OpenAiBackend::new(config)),
        BackendType::Stub => NarrationBackend::Stub(StubBackend::default()),
    }
}

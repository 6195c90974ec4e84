//! The narration stage: alert in, message out, bounded in time.

use std::time::Duration;

use carewatch_types::Alert;
use tokio::time::timeout;

use crate::backend::{NarrationBackend, StubBackend, create_backend};
use crate::config::NarrationConfig;
use crate::error::NarrationError;
use crate::prompt::{PromptEngine, RenderedPrompt};

/// Renders a prompt for an alert and asks a backend for the message.
///
/// Each call is one independent request with no retry. A call that
/// outlives `request_timeout` is abandoned and reported as
/// [`NarrationError::Timeout`].
#[derive(Debug)]
pub struct Narrator {
    backend: NarrationBackend,
    prompts: PromptEngine,
    request_timeout: Duration,
}

impl Narrator {
    /// Assemble a narrator from its parts.
    pub const fn new(
        backend: NarrationBackend,
        prompts: PromptEngine,
        request_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            prompts,
            request_timeout,
        }
    }

    /// Build a narrator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NarrationError::Config`] for invalid settings and
    /// [`NarrationError::Template`] if an override template is broken.
    pub fn from_config(config: &NarrationConfig) -> Result<Self, NarrationError> {
        config.validate()?;
        let prompts = match config.templates_dir.as_deref() {
            Some(dir) => PromptEngine::with_overrides(std::path::Path::new(dir))?,
            None => PromptEngine::builtin()?,
        };
        Ok(Self::new(
            create_backend(config),
            prompts,
            config.request_timeout(),
        ))
    }

    /// A narrator that answers every alert with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`NarrationError::Template`] only if the built-in templates
    /// fail to compile.
    pub fn stub(message: &str) -> Result<Self, NarrationError> {
        Ok(Self::new(
            NarrationBackend::Stub(StubBackend::new(message)),
            PromptEngine::builtin()?,
            Duration::from_secs(1),
        ))
    }

    /// Name of the underlying backend.
    pub const fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Produce a human-readable message for `alert`.
    pub async fn narrate(&self, alert: &Alert) -> Result<String, NarrationError> {
        let prompt = self.prompts.render(alert)?;
        self.generate_message(&prompt).await
    }

    /// Send an already-rendered prompt to the backend.
    ///
    /// The returned message is trimmed; an empty one is an error.
    pub async fn generate_message(
        &self,
        prompt: &RenderedPrompt,
    ) -> Result<String, NarrationError> {
        match timeout(self.request_timeout, self.backend.complete(prompt)).await {
            Ok(Ok(text)) => {
                let message = text.trim();
                if message.is_empty() {
                    Err(NarrationError::EmptyResponse)
                } else {
                    Ok(message.to_owned())
                }
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(NarrationError::Timeout {
                timeout_ms: self.request_timeout.as_millis(),
            }),
        }
    }
}

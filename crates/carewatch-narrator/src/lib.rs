//! Natural-language alert narration for the Carewatch monitoring core.
//!
//! Narration is a separate stage from detection: it consumes an
//! [`Alert`](carewatch_types::Alert) and produces a message for a human.
//! The text itself comes from an external text-generation service.
//!
//! # Architecture
//!
//! ```text
//! Alert --> PromptEngine (minijinja) --> NarrationBackend (HTTP) --> message
//!                          \__________ Narrator (timeout) __________/
//! ```
//!
//! # Modules
//!
//! - [`backend`] -- Ollama, `OpenAI`-compatible, and stub backends
//! - [`config`] -- Backend selection, URLs, model, timeout
//! - [`error`] -- [`NarrationError`]
//! - [`narrator`] -- The [`Narrator`] stage with its request deadline
//! - [`prompt`] -- Template loading and rendering

pub mod backend;
pub mod config;
pub mod error;
pub mod narrator;
pub mod prompt;

pub use backend::{NarrationBackend, create_backend};
pub use config::{BackendType, NarrationConfig};
pub use error::NarrationError;
pub use narrator::Narrator;
pub use prompt::{PromptEngine, RenderedPrompt};

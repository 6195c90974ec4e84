//! Prompt template loading and rendering via `minijinja`.
//!
//! One template per alert kind plus a shared system template. The
//! built-in set is compiled into the binary; operators can drop `.j2`
//! files with the same names into a directory to replace individual
//! templates without recompiling.

use std::path::Path;

use carewatch_types::{Alert, clock_hhmm};
use minijinja::Environment;

use crate::error::NarrationError;

/// Name of the shared system template.
const SYSTEM_TEMPLATE: &str = "system";

/// Built-in templates, keyed by the alert `type` tag they render.
const BUILTIN_TEMPLATES: [(&str, &str); 6] = [
    (SYSTEM_TEMPLATE, include_str!("../templates/system.j2")),
    ("health_threshold", include_str!("../templates/health_threshold.j2")),
    ("fall_detected", include_str!("../templates/fall_detected.j2")),
    ("inactivity", include_str!("../templates/inactivity.j2")),
    ("upcoming_reminder", include_str!("../templates/upcoming_reminder.j2")),
    ("daily_check", include_str!("../templates/daily_check.j2")),
];

/// The complete rendered prompt ready to send to a narration backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// System message setting tone and audience.
    pub system: String,
    /// User message describing the alert.
    pub user: String,
}

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl core::fmt::Debug for PromptEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PromptEngine").finish_non_exhaustive()
    }
}

impl PromptEngine {
    /// Create an engine with only the built-in templates.
    pub fn builtin() -> Result<Self, NarrationError> {
        let mut env = Environment::new();
        for (name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source).map_err(|e| {
                NarrationError::Template(format!("failed to add {name} template: {e}"))
            })?;
        }
        Ok(Self { env })
    }

    /// Create an engine from the built-ins, replacing any template for
    /// which `{dir}/{name}.j2` exists.
    pub fn with_overrides(dir: &Path) -> Result<Self, NarrationError> {
        let mut engine = Self::builtin()?;
        for (name, _) in BUILTIN_TEMPLATES {
            let path = dir.join(format!("{name}.j2"));
            if !path.is_file() {
                continue;
            }
            let source = std::fs::read_to_string(&path).map_err(|e| {
                NarrationError::Template(format!("failed to read {}: {e}", path.display()))
            })?;
            engine.env.add_template_owned(name, source).map_err(|e| {
                NarrationError::Template(format!("failed to add {name} template: {e}"))
            })?;
            tracing::debug!(template = name, path = %path.display(), "prompt template overridden");
        }
        Ok(engine)
    }

    /// Render the prompt for one alert.
    ///
    /// The template context is the alert's JSON form (so every field is
    /// addressable by name) plus `clock`, the `HH:MM` of the alert
    /// timestamp, and for reminders `scheduled_clock`.
    pub fn render(&self, alert: &Alert) -> Result<RenderedPrompt, NarrationError> {
        let mut context = serde_json::to_value(alert)
            .map_err(|e| NarrationError::Template(format!("alert serialization failed: {e}")))?;

        if let Some(fields) = context.as_object_mut() {
            fields.insert(
                "clock".to_owned(),
                serde_json::Value::String(clock_hhmm(alert.timestamp())),
            );
            if let Alert::UpcomingReminder(reminder) = alert {
                fields.insert(
                    "scheduled_clock".to_owned(),
                    serde_json::Value::String(clock_hhmm(reminder.scheduled_time)),
                );
            }
        }

        let system = self.render_named(SYSTEM_TEMPLATE, &context)?;
        let user = self.render_named(alert.kind(), &context)?;
        Ok(RenderedPrompt { system, user })
    }

    fn render_named(
        &self,
        name: &str,
        context: &serde_json::Value,
    ) -> Result<String, NarrationError> {
        self.env
            .get_template(name)
            .map_err(|e| NarrationError::Template(format!("missing {name} template: {e}")))?
            .render(context)
            .map(|text| text.trim().to_owned())
            .map_err(|e| NarrationError::Template(format!("{name} render failed: {e}")))
    }
}

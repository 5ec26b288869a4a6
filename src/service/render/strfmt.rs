//! Alert rendering with `strfmt` placeholders.

use std::sync::Arc;

use anyhow::anyhow;

use crate::base::{config::Config, templates::DEFAULT_ALERT_TEMPLATE, types::Res};

use super::{AlertVars, GenericRenderer, Renderer};

// Extra methods on `Renderer` applied by the strfmt implementation.

impl Renderer {
    /// Renderer for an explicit template.
    pub fn strfmt(template: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(StrfmtRenderer::new(template)),
        }
    }

    /// Renderer for the template named in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::strfmt(config.alert_template.clone())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::strfmt(DEFAULT_ALERT_TEMPLATE)
    }
}

/// Renders `{name}` placeholders.
#[derive(Debug, Clone)]
pub struct StrfmtRenderer {
    template: String,
}

impl StrfmtRenderer {
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into() }
    }
}

impl GenericRenderer for StrfmtRenderer {
    fn render(&self, vars: &AlertVars) -> Res<String> {
        ::strfmt::strfmt(&self.template, &vars.to_map()).map_err(|e| anyhow!("Failed to render alert: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> AlertVars {
        AlertVars {
            error_type: "ValueError".to_string(),
            error_value: "bad {input}".to_string(),
            datetime: "2026-10-18T12:00:00+03:00".to_string(),
            record_id: "logs:abc".to_string(),
            traceback: "ValueError: bad {input}".to_string(),
        }
    }

    #[test]
    fn default_template_includes_every_variable() {
        let text = Renderer::default().render(&vars()).unwrap();

        assert!(text.contains("ValueError: bad {input}"));
        assert!(text.contains("2026-10-18T12:00:00+03:00"));
        assert!(text.contains("logs:abc"));
    }

    #[test]
    fn unknown_placeholder_fails() {
        assert!(Renderer::strfmt("{nope}").render(&vars()).is_err());
    }
}

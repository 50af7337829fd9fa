//! Base prompt rendering.
//!
//! The composer treats the base prompt as an external collaborator behind
//! [`BasePromptRenderer`]. [`PromptManager`] is the stock implementation:
//! it renders the configured template and, when a correlation backend is
//! attached, registers the render so the composition result can report a
//! cache handle.

use std::sync::Arc;

use async_trait::async_trait;

use turnstone_config::TurnConfig;
use turnstone_core::error::TemplateError;
use turnstone_core::provider::PromptSource;
use turnstone_core::template::render_template;
use turnstone_telemetry::CorrelationClient;

/// Variables available to the base prompt template.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The agent's display name.
    pub agent_name: String,

    /// The caller's resolved display name, if known.
    pub user_name: Option<String>,
}

/// Renders the turn's generic, provider-agnostic system prompt.
#[async_trait]
pub trait BasePromptRenderer: Send + Sync {
    /// Render the base prompt. Fails with a [`TemplateError`] on a
    /// malformed template; the composer turns that into the turn's
    /// terminal error.
    async fn render_base(
        &self,
        context: &RenderContext,
        config: &TurnConfig,
    ) -> Result<PromptSource, TemplateError>;
}

/// Stock renderer backed by the configured template.
#[derive(Default)]
pub struct PromptManager {
    correlation: Option<Arc<dyn CorrelationClient>>,
}

impl PromptManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register base renders with a correlation backend. Registration also
    /// requires `correlation.enabled` in the turn configuration.
    pub fn with_correlation(mut self, client: Arc<dyn CorrelationClient>) -> Self {
        self.correlation = Some(client);
        self
    }
}

#[async_trait]
impl BasePromptRenderer for PromptManager {
    async fn render_base(
        &self,
        context: &RenderContext,
        config: &TurnConfig,
    ) -> Result<PromptSource, TemplateError> {
        let user_name = context.user_name.as_deref().unwrap_or("the user");
        let text = render_template(
            &config.prompt.base_template,
            &[
                ("agent_name", context.agent_name.as_str()),
                ("user_name", user_name),
            ],
        )?;

        match &self.correlation {
            Some(client) if config.correlation.enabled => {
                let label = format!("{}/base", config.correlation.label_prefix);
                let handle = client.register_prompt(&label, &text);
                Ok(PromptSource::Cached(handle, text))
            }
            _ => Ok(PromptSource::Plain(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstone_config::{CorrelationConfig, PromptConfig};
    use turnstone_telemetry::InMemoryCorrelation;

    fn render_ctx() -> RenderContext {
        RenderContext {
            agent_name: "Turnstone".into(),
            user_name: Some("Alice".into()),
        }
    }

    fn correlated_config() -> TurnConfig {
        TurnConfig {
            correlation: CorrelationConfig {
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn renders_default_template() {
        let manager = PromptManager::new();
        let prompt = manager
            .render_base(&render_ctx(), &TurnConfig::default())
            .await
            .unwrap();
        assert!(prompt.text().contains("Turnstone"));
        assert!(prompt.text().contains("Alice"));
        assert!(matches!(prompt, PromptSource::Plain(_)));
    }

    #[tokio::test]
    async fn correlation_yields_cached_base_prompt() {
        let backend = Arc::new(InMemoryCorrelation::new());
        let manager = PromptManager::new().with_correlation(backend.clone());
        let prompt = manager
            .render_base(&render_ctx(), &correlated_config())
            .await
            .unwrap();
        assert!(matches!(prompt, PromptSource::Cached(..)));
        assert_eq!(backend.prompts()[0].label, "turnstone/base");
    }

    #[tokio::test]
    async fn disabled_correlation_skips_registration() {
        let backend = Arc::new(InMemoryCorrelation::new());
        let manager = PromptManager::new().with_correlation(backend.clone());
        // Client wired, but `correlation.enabled` left at its false default.
        let prompt = manager
            .render_base(&render_ctx(), &TurnConfig::default())
            .await
            .unwrap();
        assert!(matches!(prompt, PromptSource::Plain(_)));
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test]
    async fn malformed_template_surfaces_template_error() {
        let config = TurnConfig {
            prompt: PromptConfig {
                base_template: "Hello {missing_var}".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = manager_err(&config).await;
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholder {
                name: "missing_var".into()
            }
        );
    }

    async fn manager_err(config: &TurnConfig) -> TemplateError {
        PromptManager::new()
            .render_base(&render_ctx(), config)
            .await
            .unwrap_err()
    }
}

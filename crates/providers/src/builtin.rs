//! The built-in (distinguished) tool provider.
//!
//! Constructed in-process rather than looked up in the registry, with
//! access to the caller's identity and the turn configuration. Its prompt
//! is complete on its own: when it is the only provider on a turn, the
//! composer uses it verbatim instead of the base prompt.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use turnstone_config::TurnConfig;
use turnstone_core::context::LLMContext;
use turnstone_core::error::ProviderError;
use turnstone_core::provider::{PromptSource, ToolProvider};
use turnstone_core::template::render_template;
use turnstone_core::tool::Tool;
use turnstone_telemetry::CorrelationClient;

/// Reserved name the built-in provider is requested under.
pub const BUILTIN_PROVIDER_ID: &str = "turnstone-builtin";

/// Default complete prompt when no `prompt.builtin_template` is configured.
const DEFAULT_BUILTIN_TEMPLATE: &str = concat!(
    "You are {agent_name}, a helpful assistant speaking with {user_name}. ",
    "You have access to tools that let you act on the user's behalf. ",
    "Use them when appropriate to accomplish the user's goals. ",
    "Be concise, accurate, and proactive.",
);

/// Anonymous stand-in substituted when the caller has no resolved user name.
const ANONYMOUS_USER: &str = "the user";

/// The distinguished in-process provider.
pub struct BuiltinProvider {
    user_name: Option<String>,
    config: TurnConfig,
    correlation: Option<Arc<dyn CorrelationClient>>,
}

impl BuiltinProvider {
    /// Construct from the caller's identity and the turn configuration.
    pub fn new(user_name: Option<String>, config: TurnConfig) -> Self {
        Self {
            user_name,
            config,
            correlation: None,
        }
    }

    /// Attach a rendering-correlation backend so this provider's prompt
    /// reports a cache handle. Registration also requires
    /// `correlation.enabled` in the turn configuration.
    pub fn set_correlation(&mut self, client: Arc<dyn CorrelationClient>) {
        debug!("attaching correlation backend to built-in provider");
        self.correlation = Some(client);
    }
}

#[async_trait]
impl ToolProvider for BuiltinProvider {
    fn name(&self) -> &str {
        BUILTIN_PROVIDER_ID
    }

    fn tools(&self) -> Vec<Tool> {
        builtin_tools()
    }

    async fn prompt(&self, _context: &LLMContext) -> Result<PromptSource, ProviderError> {
        let template = self
            .config
            .prompt
            .builtin_template
            .as_deref()
            .unwrap_or(DEFAULT_BUILTIN_TEMPLATE);

        let user_name = self.user_name.as_deref().unwrap_or(ANONYMOUS_USER);
        let text = render_template(
            template,
            &[
                ("agent_name", self.config.agent_name.as_str()),
                ("user_name", user_name),
            ],
        )
        .map_err(|e| ProviderError::PromptFailed(e.to_string()))?;

        match &self.correlation {
            Some(client) if self.config.correlation.enabled => {
                let label = format!("{}/builtin", self.config.correlation.label_prefix);
                let handle = client.register_prompt(&label, &text);
                Ok(PromptSource::Cached(handle, text))
            }
            _ => Ok(PromptSource::Plain(text)),
        }
    }
}

/// The tool descriptors every turn gets from the built-in provider.
fn builtin_tools() -> Vec<Tool> {
    vec![
        Tool::new(
            "calculator",
            "Evaluate an arithmetic expression",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "expression": { "type": "string", "description": "The expression to evaluate" }
                },
                "required": ["expression"]
            }),
        ),
        Tool::new(
            "memory_search",
            "Search the agent's long-term memory",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" }
                },
                "required": ["query"]
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstone_config::CorrelationConfig;
    use turnstone_core::context::CallerContext;
    use turnstone_telemetry::InMemoryCorrelation;

    fn test_context() -> LLMContext {
        LLMContext::new(CallerContext::new(), Some("en".into()), None)
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
    async fn default_prompt_is_plain_and_names_the_user() {
        let provider = BuiltinProvider::new(Some("Alice".into()), TurnConfig::default());
        let prompt = provider.prompt(&test_context()).await.unwrap();
        match prompt {
            PromptSource::Plain(text) => {
                assert!(text.contains("Turnstone"));
                assert!(text.contains("Alice"));
            }
            PromptSource::Cached(..) => panic!("expected plain prompt without correlation"),
        }
    }

    #[tokio::test]
    async fn anonymous_caller_gets_fallback_name() {
        let provider = BuiltinProvider::new(None, TurnConfig::default());
        let prompt = provider.prompt(&test_context()).await.unwrap();
        assert!(prompt.text().contains(ANONYMOUS_USER));
    }

    #[tokio::test]
    async fn correlation_backend_yields_cached_prompt() {
        let backend = Arc::new(InMemoryCorrelation::new());
        let mut provider = BuiltinProvider::new(Some("Alice".into()), correlated_config());
        provider.set_correlation(backend.clone());

        let prompt = provider.prompt(&test_context()).await.unwrap();
        let (handle, text) = prompt.into_parts();
        let handle = handle.expect("expected a cache handle");

        let registered = backend.prompts();
        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].handle, handle);
        assert_eq!(registered[0].text, text);
        assert_eq!(registered[0].label, "turnstone/builtin");
    }

    #[tokio::test]
    async fn disabled_correlation_skips_registration() {
        let backend = Arc::new(InMemoryCorrelation::new());
        // Client wired, but `correlation.enabled` left at its false default.
        let mut provider = BuiltinProvider::new(Some("Alice".into()), TurnConfig::default());
        provider.set_correlation(backend.clone());

        let prompt = provider.prompt(&test_context()).await.unwrap();
        assert!(matches!(prompt, PromptSource::Plain(_)));
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test]
    async fn custom_template_used_when_configured() {
        let config = TurnConfig {
            prompt: turnstone_config::PromptConfig {
                builtin_template: Some("Custom complete prompt for {user_name}.".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let provider = BuiltinProvider::new(Some("Bob".into()), config);
        let prompt = provider.prompt(&test_context()).await.unwrap();
        assert_eq!(prompt.text(), "Custom complete prompt for Bob.");
    }

    #[tokio::test]
    async fn malformed_template_is_a_prompt_failure() {
        let config = TurnConfig {
            prompt: turnstone_config::PromptConfig {
                builtin_template: Some("Hello {nobody}".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let provider = BuiltinProvider::new(None, config);
        let err = provider.prompt(&test_context()).await.unwrap_err();
        assert!(matches!(err, ProviderError::PromptFailed(_)));
    }

    #[test]
    fn builtin_tools_are_stable() {
        let provider = BuiltinProvider::new(None, TurnConfig::default());
        let names: Vec<String> = provider.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["calculator", "memory_search"]);
    }
}

//! Provider resolver — turns a requested name into a resolved provider.
//!
//! Two resolution paths: the reserved built-in name is constructed
//! in-process (with the correlation backend attached when one is present);
//! every other name goes through the registry. Both paths await the
//! provider's prompt exactly once, so a [`ResolvedProvider`] carries
//! everything the composition engine needs for the rest of the turn.

use std::sync::Arc;

use tracing::debug;

use turnstone_config::TurnConfig;
use turnstone_core::context::LLMContext;
use turnstone_core::error::{ProviderError, ProviderResolutionError};
use turnstone_core::provider::{PromptSource, ProviderKind, ToolProvider};
use turnstone_core::tool::Tool;
use turnstone_telemetry::CorrelationClient;

use crate::builtin::{BUILTIN_PROVIDER_ID, BuiltinProvider};
use crate::registry::ProviderRegistry;

/// One successfully resolved provider, owned by the turn.
///
/// The `kind` tag is set here, at resolution time, so downstream composition
/// branches on data instead of runtime type inspection.
#[derive(Clone)]
pub struct ResolvedProvider {
    /// The name this provider was requested under.
    pub name: String,

    /// Distinguished (built-in) or external.
    pub kind: ProviderKind,

    /// The underlying provider, kept for pass-through unification.
    pub provider: Arc<dyn ToolProvider>,

    /// Tool descriptors captured at resolution time.
    pub tools: Vec<Tool>,

    /// Prompt fragment captured at resolution time.
    pub prompt: PromptSource,
}

impl std::fmt::Debug for ResolvedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedProvider")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("tools", &self.tools.len())
            .field("prompt", &self.prompt.text())
            .finish()
    }
}

/// Resolves requested provider names for a turn.
pub struct ProviderResolver {
    registry: Arc<ProviderRegistry>,
    config: TurnConfig,
    correlation: Option<Arc<dyn CorrelationClient>>,
}

impl ProviderResolver {
    pub fn new(registry: Arc<ProviderRegistry>, config: TurnConfig) -> Self {
        Self {
            registry,
            config,
            correlation: None,
        }
    }

    /// Thread a rendering-correlation backend into resolution. Sourced once
    /// at turn start by the caller; the built-in provider reports cache
    /// handles only when this is set.
    pub fn with_correlation(mut self, client: Arc<dyn CorrelationClient>) -> Self {
        self.correlation = Some(client);
        self
    }

    /// Resolve one provider name.
    ///
    /// `user_name` is the caller's pre-resolved display name; only the
    /// built-in construction path consumes it.
    pub async fn resolve(
        &self,
        name: &str,
        context: &LLMContext,
        user_name: Option<&str>,
    ) -> Result<ResolvedProvider, ProviderResolutionError> {
        let (provider, kind): (Arc<dyn ToolProvider>, ProviderKind) =
            if name == BUILTIN_PROVIDER_ID {
                debug!("using built-in tool provider for request");
                let mut builtin =
                    BuiltinProvider::new(user_name.map(str::to_string), self.config.clone());
                if let Some(client) = &self.correlation {
                    builtin.set_correlation(client.clone());
                }
                (Arc::new(builtin), ProviderKind::Distinguished)
            } else {
                debug!("resolving tool provider `{name}` through registry");
                let provider = self
                    .registry
                    .get(name)
                    .ok_or_else(|| {
                        ProviderResolutionError::new(
                            name,
                            ProviderError::NotRegistered(name.to_string()),
                        )
                    })?;
                (provider, ProviderKind::External)
            };

        let tools = provider.tools();
        let prompt = provider
            .prompt(context)
            .await
            .map_err(|e| ProviderResolutionError::new(name, e))?;

        Ok(ResolvedProvider {
            name: name.to_string(),
            kind,
            provider,
            tools,
            prompt,
        })
    }
}

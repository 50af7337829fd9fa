//! Tool/prompt collection with per-provider failure isolation.
//!
//! Providers are resolved strictly in input order, one at a time. A failed
//! resolution is logged and skipped; it never aborts the turn. The result
//! is therefore always a subsequence of the requested names.

use tracing::error;

use turnstone_core::context::LLMContext;
use turnstone_providers::{ProviderResolver, ResolvedProvider};

/// Resolve each requested provider name in order.
///
/// `names = None` and `names = Some(&[])` both yield an empty result with
/// no error. No name produces more than one entry.
pub async fn collect(
    resolver: &ProviderResolver,
    names: Option<&[String]>,
    context: &LLMContext,
    user_name: Option<&str>,
) -> Vec<ResolvedProvider> {
    let Some(names) = names else {
        return Vec::new();
    };

    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        match resolver.resolve(name, context, user_name).await {
            Ok(provider) => resolved.push(provider),
            Err(err) => {
                // Continue with the remaining providers instead of failing
                // the whole turn.
                error!("error getting tool provider {name}: {err}");
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use turnstone_config::TurnConfig;
    use turnstone_core::context::CallerContext;
    use turnstone_core::error::ProviderError;
    use turnstone_core::provider::{PromptSource, ToolProvider};
    use turnstone_core::tool::Tool;
    use turnstone_providers::ProviderRegistry;

    struct StaticProvider {
        name: &'static str,
        fragment: &'static str,
    }

    #[async_trait]
    impl ToolProvider for StaticProvider {
        fn name(&self) -> &str {
            self.name
        }
        fn tools(&self) -> Vec<Tool> {
            vec![Tool::new(
                format!("{}_tool", self.name),
                "test tool",
                serde_json::json!({"type": "object", "properties": {}}),
            )]
        }
        async fn prompt(&self, _context: &LLMContext) -> Result<PromptSource, ProviderError> {
            Ok(PromptSource::Plain(self.fragment.into()))
        }
    }

    fn resolver_with(names: &[&'static str]) -> ProviderResolver {
        let mut registry = ProviderRegistry::new();
        for name in names {
            registry.register(
                *name,
                Arc::new(StaticProvider {
                    name,
                    fragment: name,
                }),
            );
        }
        ProviderResolver::new(Arc::new(registry), TurnConfig::default())
    }

    fn test_context() -> LLMContext {
        LLMContext::new(CallerContext::new(), None, None)
    }

    #[tokio::test]
    async fn absent_names_yield_empty() {
        let resolver = resolver_with(&[]);
        let resolved = collect(&resolver, None, &test_context(), None).await;
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn empty_names_yield_empty() {
        let resolver = resolver_with(&[]);
        let resolved = collect(&resolver, Some(&[]), &test_context(), None).await;
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn input_order_is_preserved() {
        let resolver = resolver_with(&["alpha", "beta", "gamma"]);
        let names: Vec<String> = ["beta", "gamma", "alpha"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let resolved = collect(&resolver, Some(&names), &test_context(), None).await;
        let got: Vec<&str> = resolved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, vec!["beta", "gamma", "alpha"]);
    }

    #[tokio::test]
    async fn failures_drop_entries_without_reordering() {
        let resolver = resolver_with(&["alpha", "gamma"]);
        let names: Vec<String> = ["alpha", "missing", "gamma"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let resolved = collect(&resolver, Some(&names), &test_context(), None).await;
        let got: Vec<&str> = resolved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, vec!["alpha", "gamma"]);
    }

    #[tokio::test]
    async fn all_failures_yield_empty_not_error() {
        let resolver = resolver_with(&[]);
        let names = vec!["bad_provider".to_string()];
        let resolved = collect(&resolver, Some(&names), &test_context(), None).await;
        assert!(resolved.is_empty());
    }
}

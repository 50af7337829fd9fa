//! Provider registry — the generic external lookup.
//!
//! Hosts register their tool providers here under the names callers request
//! them by. The reserved built-in name is never registered; the resolver
//! constructs that provider in-process.

use std::collections::HashMap;
use std::sync::Arc;

use turnstone_core::provider::ToolProvider;

/// Registry of externally supplied tool providers, keyed by name.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ToolProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider. Replaces any existing provider with the same name.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn ToolProvider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get a provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolProvider>> {
        self.providers.get(name).cloned()
    }

    /// List all registered provider names.
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use turnstone_core::context::LLMContext;
    use turnstone_core::error::ProviderError;
    use turnstone_core::provider::PromptSource;
    use turnstone_core::tool::Tool;

    struct NullProvider;

    #[async_trait]
    impl ToolProvider for NullProvider {
        fn name(&self) -> &str {
            "null"
        }
        fn tools(&self) -> Vec<Tool> {
            vec![]
        }
        async fn prompt(&self, _context: &LLMContext) -> Result<PromptSource, ProviderError> {
            Ok(PromptSource::Plain(String::new()))
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ProviderRegistry::new();
        registry.register("null", Arc::new(NullProvider));

        assert!(registry.get("null").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert_eq!(registry.names(), vec!["null"]);
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = ProviderRegistry::new();
        registry.register("null", Arc::new(NullProvider));
        registry.register("null", Arc::new(NullProvider));
        assert_eq!(registry.names().len(), 1);
    }
}

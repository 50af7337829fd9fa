//! Rendering-correlation backend client.
//!
//! Some deployments record every rendered prompt with an external backend
//! (prompt management, A/B evaluation) and get back an opaque handle used
//! to correlate the render with later traces. The engine treats the client
//! as optional: it is sourced once at turn start by the caller and threaded
//! explicitly into the resolver and renderer, never looked up mid-turn.

use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use turnstone_core::provider::CacheHandle;

/// Client for a prompt-render correlation backend.
pub trait CorrelationClient: Send + Sync {
    /// Record a rendered prompt under `label`, returning the backend's
    /// handle for it.
    fn register_prompt(&self, label: &str, text: &str) -> CacheHandle;

    /// Tag the current turn's trace with a marker.
    fn tag_turn(&self, tag: &str);
}

/// A registered prompt, as remembered by [`InMemoryCorrelation`].
#[derive(Debug, Clone)]
pub struct RegisteredPrompt {
    pub handle: CacheHandle,
    pub label: String,
    pub text: String,
}

/// In-memory correlation backend for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryCorrelation {
    prompts: Mutex<Vec<RegisteredPrompt>>,
    tags: Mutex<Vec<String>>,
}

impl InMemoryCorrelation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> Vec<RegisteredPrompt> {
        self.prompts.lock().expect("correlation poisoned").clone()
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags.lock().expect("correlation poisoned").clone()
    }
}

impl CorrelationClient for InMemoryCorrelation {
    fn register_prompt(&self, label: &str, text: &str) -> CacheHandle {
        let handle = CacheHandle::new(Uuid::new_v4().to_string());
        debug!("registered prompt under label `{label}` as {handle}");
        self.prompts
            .lock()
            .expect("correlation poisoned")
            .push(RegisteredPrompt {
                handle: handle.clone(),
                label: label.to_string(),
                text: text.to_string(),
            });
        handle
    }

    fn tag_turn(&self, tag: &str) {
        self.tags
            .lock()
            .expect("correlation poisoned")
            .push(tag.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_prompts_get_distinct_handles() {
        let backend = InMemoryCorrelation::new();
        let a = backend.register_prompt("base", "Base.");
        let b = backend.register_prompt("base", "Base.");
        assert_ne!(a, b);

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].label, "base");
        assert_eq!(prompts[0].text, "Base.");
    }

    #[test]
    fn tags_accumulate() {
        let backend = InMemoryCorrelation::new();
        backend.tag_turn("extra_system_prompt");
        assert_eq!(backend.tags(), vec!["extra_system_prompt"]);
    }
}

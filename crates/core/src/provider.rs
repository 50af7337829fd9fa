//! ToolProvider trait — the abstraction over tool/prompt suppliers.
//!
//! A ToolProvider contributes two things to a turn: a set of invocable tool
//! descriptors and a system-prompt fragment. The engine resolves providers
//! one at a time, in the order the caller requested them, and never looks
//! inside a tool beyond aggregating it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::LLMContext;
use crate::error::ProviderError;
use crate::tool::Tool;

/// Opaque reference to a rendering backend's record of a prompt, used to
/// correlate a render with later observability lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheHandle(pub String);

impl CacheHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A provider's prompt output: plain text, or text paired with the cache
/// handle its rendering backend issued.
///
/// Every consumer unwraps this through [`PromptSource::into_parts`] so the
/// two shapes are handled uniformly in all composition branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PromptSource {
    /// A prompt with no correlation record.
    Plain(String),
    /// A prompt registered with a correlation backend.
    Cached(CacheHandle, String),
}

impl PromptSource {
    /// The prompt text, regardless of shape.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Cached(_, text) => text,
        }
    }

    /// Split into the optional cache handle and the prompt text.
    pub fn into_parts(self) -> (Option<CacheHandle>, String) {
        match self {
            Self::Plain(text) => (None, text),
            Self::Cached(handle, text) => (Some(handle), text),
        }
    }
}

/// Whether a provider is the built-in distinguished provider or an external
/// one resolved through the registry.
///
/// Set once at resolution time; composition logic branches on this tag, not
/// on runtime type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// The reserved in-process provider.
    Distinguished,
    /// Any provider resolved through the registry.
    External,
}

/// The core ToolProvider trait.
///
/// Implementations: the built-in distinguished provider, plus whatever the
/// host registers (weather, calendar, home control, ...). The composition
/// engine calls `tools()` and awaits `prompt()` exactly once per turn.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// The unique name this provider is requested under.
    fn name(&self) -> &str;

    /// The tool descriptors this provider exposes for the turn.
    fn tools(&self) -> Vec<Tool>;

    /// Produce this provider's system-prompt fragment for the turn.
    ///
    /// May suspend on external I/O. Returns either a plain prompt or a
    /// (cache handle, prompt) pair when a rendering backend recorded it.
    async fn prompt(&self, context: &LLMContext) -> Result<PromptSource, ProviderError>;
}

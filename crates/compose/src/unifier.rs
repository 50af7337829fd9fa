//! Provider unification — the single provider-shaped object the turn uses.
//!
//! Zero resolved providers means the turn proceeds without tool calling.
//! One resolved provider passes through unchanged. Two or more become a
//! synthetic composite that keeps the first provider's identity for
//! downstream checks and serialization, and exposes the union of all tools
//! in resolution order.

use tracing::debug;

use turnstone_core::context::LLMContext;
use turnstone_core::provider::ProviderKind;
use turnstone_core::tool::{Tool, ToolArgSerializer, standard_arg_serializer};
use turnstone_providers::ResolvedProvider;

/// The provider installed on the turn after unification.
#[derive(Debug, Clone)]
pub enum EffectiveProvider {
    /// The sole resolved provider, unchanged.
    Single(ResolvedProvider),

    /// A synthetic provider combining several resolved providers.
    Composite {
        /// Name of the first resolved provider, kept for identity and
        /// serialization purposes.
        reference_name: String,

        /// Kind of the first resolved provider.
        reference_kind: ProviderKind,

        /// The composed system prompt covering all member providers.
        prompt: String,

        /// The turn's shared invocation context.
        context: LLMContext,

        /// Concatenation (not deduplication) of every member's tools,
        /// in resolution order.
        tools: Vec<Tool>,

        /// The standard argument serializer shared by all providers.
        serializer: ToolArgSerializer,
    },
}

impl EffectiveProvider {
    /// The effective tool list for the turn.
    pub fn tools(&self) -> &[Tool] {
        match self {
            Self::Single(resolved) => &resolved.tools,
            Self::Composite { tools, .. } => tools,
        }
    }

    /// The provider name used for identity checks downstream.
    pub fn reference_name(&self) -> &str {
        match self {
            Self::Single(resolved) => &resolved.name,
            Self::Composite { reference_name, .. } => reference_name,
        }
    }

    /// The kind of the provider (first member for composites).
    pub fn reference_kind(&self) -> ProviderKind {
        match self {
            Self::Single(resolved) => resolved.kind,
            Self::Composite { reference_kind, .. } => *reference_kind,
        }
    }
}

/// Produce the turn's effective provider, or `None` when nothing resolved.
pub fn unify(
    resolved: Vec<ResolvedProvider>,
    composed_prompt: &str,
    context: &LLMContext,
) -> Option<EffectiveProvider> {
    match resolved.len() {
        0 => None,
        1 => {
            let sole = resolved.into_iter().next().expect("length checked");
            Some(EffectiveProvider::Single(sole))
        }
        n => {
            let tools: Vec<Tool> = resolved.iter().flat_map(|p| p.tools.clone()).collect();
            debug!("combining tools from {n} providers: {} total tools", tools.len());
            let first = &resolved[0];
            Some(EffectiveProvider::Composite {
                reference_name: first.name.clone(),
                reference_kind: first.kind,
                prompt: composed_prompt.to_string(),
                context: context.clone(),
                tools,
                serializer: standard_arg_serializer,
            })
        }
    }
}

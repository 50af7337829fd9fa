//! Prompt composition — three mutually exclusive policies.
//!
//! Which policy applies is decided purely by the shape of the collected
//! providers:
//!
//! 1. exactly one provider and it is the distinguished one → its own
//!    prompt verbatim (it is complete by definition);
//! 2. no providers → the rendered base prompt;
//! 3. anything else → base prompt plus every fragment, newline-separated,
//!    in resolution order.
//!
//! A base-template failure is the engine's single fatal path: it becomes a
//! [`TurnConversionError`] and no partial prompt is produced.

use tracing::debug;

use turnstone_config::TurnConfig;
use turnstone_core::error::TurnConversionError;
use turnstone_core::message::ConversationId;
use turnstone_core::provider::{CacheHandle, ProviderKind};
use turnstone_providers::ResolvedProvider;

use crate::render::{BasePromptRenderer, RenderContext};

/// The composed prompt plus the optional cache handle of the render that
/// produced it, for correlation by the caller.
#[derive(Debug, Clone)]
pub struct CompositionResult {
    pub prompt: String,
    pub cache_handle: Option<CacheHandle>,
}

/// Merge the resolved providers' prompt fragments into the final prompt.
pub async fn compose(
    resolved: &[ResolvedProvider],
    renderer: &dyn BasePromptRenderer,
    render_context: &RenderContext,
    config: &TurnConfig,
    conversation_id: &ConversationId,
) -> Result<CompositionResult, TurnConversionError> {
    match resolved {
        // Sole distinguished provider: its prompt is already complete.
        [sole] if sole.kind == ProviderKind::Distinguished => {
            debug!("composing with the distinguished provider's own prompt");
            let (cache_handle, prompt) = sole.prompt.clone().into_parts();
            Ok(CompositionResult {
                prompt,
                cache_handle,
            })
        }

        // No providers: fall back to the generic base prompt.
        [] => {
            debug!("no tool providers resolved, composing base prompt only");
            let base = renderer
                .render_base(render_context, config)
                .await
                .map_err(|e| TurnConversionError::from_template(conversation_id.clone(), e))?;
            let (cache_handle, prompt) = base.into_parts();
            Ok(CompositionResult {
                prompt,
                cache_handle,
            })
        }

        // Multiple providers, or a single external one: base prompt plus
        // every fragment, in resolution order.
        many => {
            let base = renderer
                .render_base(render_context, config)
                .await
                .map_err(|e| TurnConversionError::from_template(conversation_id.clone(), e))?;
            let (cache_handle, base_text) = base.into_parts();

            let mut parts = Vec::with_capacity(many.len() + 1);
            parts.push(base_text);
            parts.extend(many.iter().map(|p| p.prompt.text().to_string()));
            let prompt = parts.join("\n");
            debug!("composed prompt from {} provider fragments", many.len());

            Ok(CompositionResult {
                prompt,
                cache_handle,
            })
        }
    }
}

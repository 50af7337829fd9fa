//! Turn context assembly — the orchestrating step.
//!
//! Runs collect → compose → unify for one turn, applies the caller's
//! extra-system-prompt override, installs the effective provider on the
//! turn, overwrites the leading system message, and emits one trace
//! record. Returns the composer's optional cache handle so the caller can
//! correlate the render.

use std::sync::Arc;

use tracing::debug;

use turnstone_config::TurnConfig;
use turnstone_core::context::{CallerContext, LLMContext};
use turnstone_core::error::TurnConversionError;
use turnstone_core::provider::CacheHandle;
use turnstone_providers::ProviderResolver;
use turnstone_telemetry::{CorrelationClient, TraceEvent, TraceSink};

use crate::collector::collect;
use crate::composer::compose;
use crate::render::{BasePromptRenderer, RenderContext};
use crate::turn::TurnState;
use crate::unifier::unify;

/// Trace tag set when an extra system prompt is appended.
pub const EXTRA_SYSTEM_PROMPT_TAG: &str = "extra_system_prompt";

/// Caller-supplied inputs for one turn.
#[derive(Debug, Clone, Default)]
pub struct TurnInput {
    /// Who is asking.
    pub caller: CallerContext,

    /// BCP-47 language tag, if known.
    pub language: Option<String>,

    /// Originating device, if any.
    pub device_id: Option<String>,

    /// The caller's display name, pre-resolved by the host.
    pub user_name: Option<String>,

    /// Requested provider names, in order. `None` falls back to the
    /// configured default list.
    pub provider_names: Option<Vec<String>>,

    /// Per-call prompt addendum; overrides the value stored on the turn.
    pub extra_system_prompt: Option<String>,
}

/// Assembles the effective system context for conversational turns.
pub struct TurnAssembler {
    resolver: ProviderResolver,
    renderer: Box<dyn BasePromptRenderer>,
    trace: Arc<dyn TraceSink>,
    correlation: Option<Arc<dyn CorrelationClient>>,
    config: TurnConfig,
}

impl TurnAssembler {
    pub fn new(
        resolver: ProviderResolver,
        renderer: Box<dyn BasePromptRenderer>,
        trace: Arc<dyn TraceSink>,
        config: TurnConfig,
    ) -> Self {
        Self {
            resolver,
            renderer,
            trace,
            correlation: None,
            config,
        }
    }

    /// Attach a correlation backend used to tag the turn's trace.
    pub fn with_correlation(mut self, client: Arc<dyn CorrelationClient>) -> Self {
        self.correlation = Some(client);
        self
    }

    /// Assemble one turn's system context and publish it onto `turn`.
    ///
    /// On a composition failure nothing is installed: the turn keeps its
    /// previous state and the error is returned for the caller to end the
    /// turn with an error response.
    pub async fn update_turn(
        &self,
        turn: &mut TurnState,
        input: TurnInput,
    ) -> Result<Option<CacheHandle>, TurnConversionError> {
        let context = LLMContext::new(input.caller, input.language, input.device_id);

        let provider_names = input.provider_names.or_else(|| {
            if self.config.providers.is_empty() {
                None
            } else {
                Some(self.config.providers.clone())
            }
        });

        let resolved = collect(
            &self.resolver,
            provider_names.as_deref(),
            &context,
            input.user_name.as_deref(),
        )
        .await;

        let render_context = RenderContext {
            agent_name: self.config.agent_name.clone(),
            user_name: input.user_name.clone(),
        };
        let composition = compose(
            &resolved,
            self.renderer.as_ref(),
            &render_context,
            &self.config,
            &turn.conversation_id,
        )
        .await?;

        let mut prompt = composition.prompt;

        // Take the new addendum if one was given, else keep the stored one.
        let extra_system_prompt = input
            .extra_system_prompt
            .or_else(|| turn.extra_system_prompt.clone());

        if let Some(extra) = &extra_system_prompt {
            debug!("using extra system prompt: {extra}");
            prompt.push('\n');
            prompt.push_str(extra);
            if let Some(client) = &self.correlation {
                client.tag_turn(EXTRA_SYSTEM_PROMPT_TAG);
            }
        }

        turn.effective_provider = unify(resolved, &prompt, &context);
        turn.extra_system_prompt = extra_system_prompt;
        turn.set_leading_system(&prompt);

        let tools = turn
            .effective_provider
            .as_ref()
            .map(|provider| provider.tools().to_vec());
        self.trace
            .append(TraceEvent::agent_detail(turn.messages.clone(), tools));

        Ok(composition.cache_handle)
    }
}

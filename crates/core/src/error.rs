//! Error types for the Turnstone domain.
//!
//! Uses `thiserror` for ergonomic error definitions. The taxonomy follows
//! the engine's propagation policy: per-provider failures are recoverable
//! and contained at the collector; a base-prompt template failure is the
//! single fatal path out of a turn.

use thiserror::Error;

use crate::message::ConversationId;

/// Fixed user-facing message carried by every [`TurnConversionError`].
pub const TURN_FALLBACK_MESSAGE: &str = "a problem occurred while preparing the response";

/// The top-level error type for all Turnstone operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider resolution error: {0}")]
    ProviderResolution(#[from] ProviderResolutionError),

    // --- Template errors ---
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    // --- Turn-level errors ---
    #[error("Turn conversion error: {0}")]
    TurnConversion(#[from] TurnConversionError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// What an individual provider or registry lookup can raise.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("no tool provider registered under `{0}`")]
    NotRegistered(String),

    #[error("prompt generation failed: {0}")]
    PromptFailed(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Failure to resolve one requested provider name.
///
/// Recoverable: the collector logs it and continues with the remaining
/// names. It never aborts the turn.
#[derive(Debug, Clone, Error)]
#[error("failed to resolve tool provider `{name}`: {source}")]
pub struct ProviderResolutionError {
    /// The requested provider name.
    pub name: String,

    /// The underlying cause.
    #[source]
    pub source: ProviderError,
}

impl ProviderResolutionError {
    pub fn new(name: impl Into<String>, source: ProviderError) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// Raised while rendering a prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder `{{{name}}}` in prompt template")]
    UnknownPlaceholder { name: String },

    #[error("unclosed placeholder in prompt template at byte {offset}")]
    UnclosedPlaceholder { offset: usize },
}

/// Fatal turn-level failure: the base prompt could not be rendered.
///
/// Carries the conversation identifier for the caller's error response and
/// a fixed user-facing fallback message. No partial prompt is produced on
/// this path.
#[derive(Debug, Clone, Error)]
#[error("turn {conversation_id} failed during prompt composition: {message}")]
pub struct TurnConversionError {
    /// Which conversation the failed turn belongs to.
    pub conversation_id: ConversationId,

    /// User-facing fallback message.
    pub message: String,

    /// The template failure that caused this.
    #[source]
    pub source: TemplateError,
}

impl TurnConversionError {
    /// Wrap a template failure as the turn's terminal error.
    pub fn from_template(conversation_id: ConversationId, source: TemplateError) -> Self {
        Self {
            conversation_id,
            message: TURN_FALLBACK_MESSAGE.into(),
            source,
        }
    }
}

//! # Turnstone Core
//!
//! Domain types, traits, and error definitions for the Turnstone turn-context
//! engine. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator is defined as a trait here or in `turnstone-telemetry`.
//! Implementations live in their respective crates. This enables:
//! - Swapping provider and renderer implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod context;
pub mod error;
pub mod message;
pub mod provider;
pub mod template;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use context::{CallerContext, LLMContext, PLATFORM_ID};
pub use error::{
    Error, ProviderError, ProviderResolutionError, Result, TURN_FALLBACK_MESSAGE, TemplateError,
    TurnConversionError,
};
pub use message::{ConversationId, Message, Role};
pub use provider::{CacheHandle, PromptSource, ProviderKind, ToolProvider};
pub use tool::{Tool, ToolArgSerializer, standard_arg_serializer};

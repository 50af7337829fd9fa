//! The per-turn invocation environment.
//!
//! An [`LLMContext`] describes the circumstances of a single conversational
//! turn: which platform asked, on whose behalf, in which language, and from
//! which device. It is built once by the assembler at the start of a turn
//! and passed by reference to every provider resolution — never mutated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Platform identifier stamped onto every context this engine creates.
pub const PLATFORM_ID: &str = "turnstone";

/// The assistant channel used when none is specified by the caller.
pub const DEFAULT_ASSISTANT: &str = "conversation";

/// Identifies the caller of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    /// Unique id for this invocation context.
    pub id: String,

    /// The authenticated user behind the request, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CallerContext {
    /// Create a fresh anonymous caller context.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: None,
        }
    }

    /// Create a caller context for a known user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: Some(user_id.into()),
        }
    }
}

impl Default for CallerContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable description of one turn's invocation environment.
///
/// Providers receive this by reference when producing their prompt fragment;
/// the synthetic effective provider carries a clone of it for the lifetime
/// of the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LLMContext {
    /// The platform that initiated the turn.
    pub platform: String,

    /// Who is asking.
    pub caller: CallerContext,

    /// BCP-47 language tag of the conversation, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// The assistant channel handling the turn.
    pub assistant: String,

    /// Device the request originated from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl LLMContext {
    /// Build a context for this engine's platform.
    pub fn new(caller: CallerContext, language: Option<String>, device_id: Option<String>) -> Self {
        Self {
            platform: PLATFORM_ID.into(),
            caller,
            language,
            assistant: DEFAULT_ASSISTANT.into(),
            device_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_carries_platform_id() {
        let ctx = LLMContext::new(CallerContext::new(), Some("en".into()), None);
        assert_eq!(ctx.platform, PLATFORM_ID);
        assert_eq!(ctx.assistant, DEFAULT_ASSISTANT);
        assert_eq!(ctx.language.as_deref(), Some("en"));
    }

    #[test]
    fn caller_context_for_user() {
        let caller = CallerContext::for_user("user-42");
        assert_eq!(caller.user_id.as_deref(), Some("user-42"));
        assert!(!caller.id.is_empty());
    }

    #[test]
    fn context_serialization_roundtrip() {
        let ctx = LLMContext::new(CallerContext::for_user("u1"), None, Some("dev-1".into()));
        let json = serde_json::to_string(&ctx).unwrap();
        let back: LLMContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}

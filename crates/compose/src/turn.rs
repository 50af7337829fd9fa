//! Mutable per-turn session state.
//!
//! `TurnState` is the explicit value the assembler reads and writes instead
//! of a hidden host session object. Documented field contract: the engine
//! writes `extra_system_prompt`, `effective_provider`, and the leading
//! system message; everything else belongs to the host.

use turnstone_core::message::{ConversationId, Message, Role};

use crate::unifier::EffectiveProvider;

/// The session state one turn mutates.
#[derive(Debug)]
pub struct TurnState {
    /// Which conversation this turn belongs to.
    pub conversation_id: ConversationId,

    /// Ordered messages; index 0 is the leading system message.
    pub messages: Vec<Message>,

    /// Prompt addendum persisted across turns. A per-call override replaces
    /// it; otherwise the stored value keeps applying.
    pub extra_system_prompt: Option<String>,

    /// The provider installed by the last assembled turn, if any.
    pub effective_provider: Option<EffectiveProvider>,
}

impl TurnState {
    /// Create turn state with an empty leading system message.
    pub fn new(conversation_id: ConversationId) -> Self {
        Self {
            conversation_id,
            messages: vec![Message::system("")],
            extra_system_prompt: None,
            effective_provider: None,
        }
    }

    /// Overwrite the leading system message with the final composed prompt.
    ///
    /// Inserts one if the host removed it.
    pub fn set_leading_system(&mut self, content: impl Into<String>) {
        let message = Message::system(content);
        match self.messages.first() {
            Some(first) if first.role == Role::System => self.messages[0] = message,
            _ => self.messages.insert(0, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_turn_has_leading_system_message() {
        let turn = TurnState::new(ConversationId::from("c1"));
        assert_eq!(turn.messages.len(), 1);
        assert_eq!(turn.messages[0].role, Role::System);
        assert!(turn.effective_provider.is_none());
    }

    #[test]
    fn set_leading_system_overwrites() {
        let mut turn = TurnState::new(ConversationId::from("c1"));
        turn.messages.push(Message::user("hi"));
        turn.set_leading_system("Composed prompt.");
        assert_eq!(turn.messages.len(), 2);
        assert_eq!(turn.messages[0].content, "Composed prompt.");
    }

    #[test]
    fn set_leading_system_inserts_when_missing() {
        let mut turn = TurnState::new(ConversationId::from("c1"));
        turn.messages.clear();
        turn.messages.push(Message::user("hi"));
        turn.set_leading_system("Composed prompt.");
        assert_eq!(turn.messages[0].role, Role::System);
        assert_eq!(turn.messages[1].content, "hi");
    }
}

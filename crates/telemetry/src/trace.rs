//! Conversation trace sink.
//!
//! The assembler emits exactly one [`TraceEvent`] per turn after the final
//! prompt is installed: the full message list plus the effective tool list
//! (or `None` when the turn has no tool-calling capability). Sinks must not
//! fail the turn; `append` is fire-and-forget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::debug;

use turnstone_core::message::Message;
use turnstone_core::tool::Tool;

/// The kind of trace record being appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceEventType {
    /// Detail snapshot of the agent's context after turn assembly.
    AgentDetail,
}

/// Payload of a trace record: what the model will see this turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracePayload {
    /// The turn's full message list, leading system message included.
    pub messages: Vec<Message>,

    /// The effective tool list, or `None` when no provider resolved.
    pub tools: Option<Vec<Tool>>,
}

/// One appended trace record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub event_type: TraceEventType,
    pub payload: TracePayload,
    pub timestamp: DateTime<Utc>,
}

impl TraceEvent {
    pub fn agent_detail(messages: Vec<Message>, tools: Option<Vec<Tool>>) -> Self {
        Self {
            event_type: TraceEventType::AgentDetail,
            payload: TracePayload { messages, tools },
            timestamp: Utc::now(),
        }
    }
}

/// Fire-and-forget observability sink.
pub trait TraceSink: Send + Sync {
    /// Append one trace record. Implementations must not block the turn on
    /// backend errors; drop or buffer instead.
    fn append(&self, event: TraceEvent);
}

/// A sink that buffers events in memory.
///
/// Used in tests and by embedding hosts that drain events themselves.
#[derive(Debug, Default)]
pub struct InMemoryTraceSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl InMemoryTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events appended so far.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().expect("trace sink poisoned").clone()
    }
}

impl TraceSink for InMemoryTraceSink {
    fn append(&self, event: TraceEvent) {
        debug!(
            "buffering {:?} trace event with {} messages",
            event.event_type,
            event.payload.messages.len()
        );
        self.events.lock().expect("trace sink poisoned").push(event);
    }
}

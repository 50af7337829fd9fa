//! Tool descriptors — what a provider contributes to the turn.
//!
//! The engine never executes tools; it only aggregates their descriptors
//! across providers, in resolution order and without deduplication, so the
//! model sees exactly what each provider exposed.

use serde::{Deserialize, Serialize};

/// An invocable tool descriptor supplied by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Serializer applied to tool parameter schemas before they are sent to a
/// model backend. Synthetic composite providers always carry
/// [`standard_arg_serializer`].
pub type ToolArgSerializer = fn(&serde_json::Value) -> serde_json::Value;

/// The standard argument serializer shared by all providers.
///
/// Guarantees the schema is an object schema; anything else is wrapped so
/// downstream serialization never sees a bare scalar schema.
pub fn standard_arg_serializer(schema: &serde_json::Value) -> serde_json::Value {
    match schema {
        serde_json::Value::Object(map) if map.contains_key("type") => schema.clone(),
        serde_json::Value::Object(map) => {
            let mut out = map.clone();
            out.insert("type".into(), serde_json::Value::String("object".into()));
            serde_json::Value::Object(out)
        }
        other => serde_json::json!({ "type": "object", "properties": {}, "value": other }),
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Intent name Lex reports when no configured intent matched. Also the
/// name replayed when the stored intent has been lost.
pub const FALLBACK_INTENT: &str = "FallbackIntent";

/// Plain mirror of a Lex V2 intent as it appears in the client-held
/// session state. Field names follow the Lex wire format (camelCase)
/// so the stored JSON can be replayed to Lex on the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexIntent {
    pub name: String,
    #[serde(default = "default_intent_state")]
    pub state: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, Option<LexSlot>>,
}

impl LexIntent {
    /// Intent replayed when the stored one is missing or unusable.
    pub fn fallback() -> Self {
        Self {
            name: FALLBACK_INTENT.to_string(),
            state: default_intent_state(),
            slots: HashMap::new(),
        }
    }
}

fn default_intent_state() -> String {
    "ReadyForFulfillment".to_string()
}

/// A single slot in a mirrored intent. Lex sends unfilled slots as JSON
/// `null`, which maps to a `None` entry in [`LexIntent::slots`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<LexSlotValue>,
}

/// The value payload of a filled slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexSlotValue {
    #[serde(
        rename = "originalValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_value: Option<String>,
    #[serde(
        rename = "interpretedValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub interpreted_value: Option<String>,
    #[serde(
        rename = "resolvedValues",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub resolved_values: Vec<String>,
}

/// Mirror of the Lex dialog action. Defaults to `Delegate`, letting the
/// bot decide the next step when the state is replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogAction {
    #[serde(rename = "type")]
    pub action_type: String,
}

impl Default for DialogAction {
    fn default() -> Self {
        Self {
            action_type: "Delegate".to_string(),
        }
    }
}

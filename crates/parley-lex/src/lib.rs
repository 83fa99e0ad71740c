//! parley-lex
//!
//! Intent recognition via Amazon Lex V2. Sends the user's text together
//! with the replayed session context and maps the response into plain
//! types the chat pipeline can reason about.

pub mod error;

use std::collections::HashMap;

use aws_sdk_lexruntimev2::operation::recognize_text::RecognizeTextOutput;
use aws_sdk_lexruntimev2::types::{
    DialogAction as SdkDialogAction, DialogActionType, Intent, IntentState, Interpretation,
    SessionState as SdkSessionState, Slot, Value,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use parley_core::models::lex::{DialogAction, LexIntent, LexSlot, LexSlotValue, FALLBACK_INTENT};
use parley_core::models::session::SessionState;
use parley_core::settings::Settings;

use crate::error::LexError;

/// Message fragments Lex produces when its own backend failed. A reply
/// containing one of these is never surfaced as a direct response.
const ERROR_INDICATORS: [&str; 5] = [
    "something went wrong while answering that",
    "try again in a moment",
    "error",
    "failed",
    "hmm, something went wrong",
];

// ── Domain types ────────────────────────────────────────────────────────────

/// A `RecognizeText` response mapped into plain types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexOutcome {
    pub messages: Vec<LexMessage>,
    pub interpretations: Vec<LexInterpretation>,
    pub session_attributes: HashMap<String, String>,
    pub intent: Option<LexIntent>,
    pub dialog_action: Option<DialogAction>,
}

impl LexOutcome {
    /// Outcome used when Lex is disabled or unreachable: no messages
    /// and a single `FallbackIntent` interpretation, which sends the
    /// chat pipeline straight to the model.
    pub fn fallback() -> Self {
        Self {
            interpretations: vec![LexInterpretation {
                intent: Some(LexIntent::fallback()),
            }],
            ..Self::default()
        }
    }
}

/// One message returned by the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexMessage {
    pub content: String,
    pub content_type: String,
}

/// One ranked interpretation of the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexInterpretation {
    pub intent: Option<LexIntent>,
}

/// Slot values pulled out of the interpretations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSlots {
    pub person: Option<String>,
    pub question: Option<String>,
}

// ── Recognition ─────────────────────────────────────────────────────────────

/// Run the user's text through Lex.
///
/// Lex is an optional layer in front of the model, so an API failure is
/// never surfaced: the error is logged and a fallback outcome is
/// returned, which the chat pipeline treats as "ask the model".
pub async fn recognize_text(
    config: &aws_config::SdkConfig,
    settings: &Settings,
    session_id: &str,
    text: &str,
    state: &SessionState,
) -> LexOutcome {
    match call_recognize_text(config, settings, session_id, text, state).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(session_id, error = %e, "lex recognition failed, falling back to the model");
            LexOutcome::fallback()
        }
    }
}

async fn call_recognize_text(
    config: &aws_config::SdkConfig,
    settings: &Settings,
    session_id: &str,
    text: &str,
    state: &SessionState,
) -> Result<LexOutcome, LexError> {
    let client = aws_sdk_lexruntimev2::Client::new(config);
    let replay = replay_session_state(state)?;

    let resp = client
        .recognize_text()
        .bot_id(&settings.lex_bot_id)
        .bot_alias_id(&settings.lex_bot_alias_id)
        .locale_id(&settings.lex_locale_id)
        .session_id(session_id)
        .text(text)
        .set_session_state(replay)
        .send()
        .await
        .map_err(|e| LexError::Api(e.into_service_error().to_string()))?;

    let outcome = map_response(&resp);
    debug!(
        session_id,
        messages = outcome.messages.len(),
        intent = outcome
            .intent
            .as_ref()
            .map(|i| i.name.as_str())
            .unwrap_or("none"),
        "lex recognized text"
    );
    Ok(outcome)
}

/// Rebuild the Lex-side session state from the client-held mirror so
/// the bot keeps its dialog context across stateless requests. Nothing
/// to replay on the first turn.
fn replay_session_state(state: &SessionState) -> Result<Option<SdkSessionState>, LexError> {
    if state.intent.is_none() && state.session_attributes.is_empty() {
        return Ok(None);
    }

    let intent = state.intent.clone().unwrap_or_else(LexIntent::fallback);
    // Lex rejects null slot entries on input, replay them as empty slots.
    let mut slots: HashMap<String, Slot> = HashMap::new();
    for (name, slot) in &intent.slots {
        slots.insert(name.clone(), rebuild_slot(slot.as_ref())?);
    }

    let sdk_intent = Intent::builder()
        .name(&intent.name)
        .state(IntentState::from(intent.state.as_str()))
        .set_slots(Some(slots))
        .build()
        .map_err(|e| LexError::Replay(e.to_string()))?;

    let action_type = state
        .dialog_action
        .as_ref()
        .map(|d| d.action_type.as_str())
        .unwrap_or("Delegate");
    let dialog_action = SdkDialogAction::builder()
        .r#type(DialogActionType::from(action_type))
        .build()
        .map_err(|e| LexError::Replay(e.to_string()))?;

    let mut builder = SdkSessionState::builder()
        .intent(sdk_intent)
        .dialog_action(dialog_action);
    if !state.session_attributes.is_empty() {
        builder = builder.set_session_attributes(Some(state.session_attributes.clone()));
    }
    Ok(Some(builder.build()))
}

fn rebuild_slot(slot: Option<&LexSlot>) -> Result<Slot, LexError> {
    let Some(value) = slot.and_then(|s| s.value.as_ref()) else {
        return Ok(Slot::builder().build());
    };
    let interpreted = value
        .interpreted_value
        .clone()
        .or_else(|| value.original_value.clone())
        .unwrap_or_default();
    let sdk_value = Value::builder()
        .interpreted_value(interpreted)
        .set_original_value(value.original_value.clone())
        .set_resolved_values(if value.resolved_values.is_empty() {
            None
        } else {
            Some(value.resolved_values.clone())
        })
        .build()
        .map_err(|e| LexError::Replay(e.to_string()))?;
    Ok(Slot::builder().value(sdk_value).build())
}

// ── Response mapping ────────────────────────────────────────────────────────

fn map_response(resp: &RecognizeTextOutput) -> LexOutcome {
    let messages = resp
        .messages()
        .iter()
        .map(|m| LexMessage {
            content: m.content().unwrap_or_default().to_string(),
            content_type: m.content_type().as_str().to_string(),
        })
        .collect();

    let interpretations = resp
        .interpretations()
        .iter()
        .map(map_interpretation)
        .collect();

    let (session_attributes, intent, dialog_action) = match resp.session_state() {
        Some(ss) => (
            ss.session_attributes().cloned().unwrap_or_default(),
            ss.intent().map(map_intent),
            ss.dialog_action().map(|d| DialogAction {
                action_type: d.r#type().as_str().to_string(),
            }),
        ),
        None => (HashMap::new(), None, None),
    };

    LexOutcome {
        messages,
        interpretations,
        session_attributes,
        intent,
        dialog_action,
    }
}

fn map_interpretation(interpretation: &Interpretation) -> LexInterpretation {
    LexInterpretation {
        intent: interpretation.intent().map(map_intent),
    }
}

fn map_intent(intent: &Intent) -> LexIntent {
    let slots = intent
        .slots()
        .map(|map| {
            map.iter()
                .map(|(name, slot)| (name.clone(), Some(map_slot(slot))))
                .collect()
        })
        .unwrap_or_default();
    LexIntent {
        name: intent.name().to_string(),
        state: intent
            .state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "ReadyForFulfillment".to_string()),
        slots,
    }
}

fn map_slot(slot: &Slot) -> LexSlot {
    LexSlot {
        value: slot.value().map(|v| LexSlotValue {
            original_value: v.original_value().map(str::to_string),
            interpreted_value: Some(v.interpreted_value().to_string()),
            resolved_values: v.resolved_values().to_vec(),
        }),
    }
}

// ── Outcome inspection ──────────────────────────────────────────────────────

/// The bot's own answer, when it actually answered.
///
/// Returns `Some` only when the outcome carries messages, the top
/// interpretation is not `FallbackIntent`, and the concatenated text is
/// non-blank and free of the bot's error phrasing. Anything else means
/// the model should answer instead.
pub fn direct_response(outcome: &LexOutcome) -> Option<String> {
    if outcome.messages.is_empty() {
        return None;
    }
    let top_is_fallback = outcome
        .interpretations
        .first()
        .and_then(|i| i.intent.as_ref())
        .is_some_and(|i| i.name == FALLBACK_INTENT);
    if top_is_fallback {
        return None;
    }

    let text = outcome
        .messages
        .iter()
        .filter(|m| m.content_type == "PlainText")
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let lowered = text.to_lowercase();
    if ERROR_INDICATORS.iter().any(|ind| lowered.contains(ind)) {
        return None;
    }
    Some(text.to_string())
}

/// Pull the `person` and `question` slot original values out of the
/// interpretations. The first interpretation carrying a value wins.
pub fn extract_slots(outcome: &LexOutcome) -> ExtractedSlots {
    let mut slots = ExtractedSlots::default();
    for interpretation in &outcome.interpretations {
        let Some(intent) = &interpretation.intent else {
            continue;
        };
        if slots.person.is_none() {
            slots.person = slot_original_value(intent, "person");
        }
        if slots.question.is_none() {
            slots.question = slot_original_value(intent, "question");
        }
    }
    slots
}

fn slot_original_value(intent: &LexIntent, name: &str) -> Option<String> {
    intent
        .slots
        .get(name)
        .and_then(|slot| slot.as_ref())
        .and_then(|slot| slot.value.as_ref())
        .and_then(|value| value.original_value.clone())
        .filter(|v| !v.trim().is_empty())
}

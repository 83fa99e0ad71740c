use std::collections::HashMap;

use parley_core::models::lex::{LexIntent, LexSlot, LexSlotValue, FALLBACK_INTENT};
use parley_lex::{direct_response, extract_slots, LexInterpretation, LexMessage, LexOutcome};

fn plain_message(content: &str) -> LexMessage {
    LexMessage {
        content: content.to_string(),
        content_type: "PlainText".to_string(),
    }
}

fn intent_with_slot(intent_name: &str, slot_name: &str, original: &str) -> LexIntent {
    let mut slots = HashMap::new();
    slots.insert(
        slot_name.to_string(),
        Some(LexSlot {
            value: Some(LexSlotValue {
                original_value: Some(original.to_string()),
                interpreted_value: Some(original.to_string()),
                resolved_values: vec![],
            }),
        }),
    );
    LexIntent {
        name: intent_name.to_string(),
        state: "ReadyForFulfillment".to_string(),
        slots,
    }
}

fn interpretation(intent_name: &str) -> LexInterpretation {
    LexInterpretation {
        intent: Some(LexIntent {
            name: intent_name.to_string(),
            state: "ReadyForFulfillment".to_string(),
            slots: HashMap::new(),
        }),
    }
}

#[test]
fn no_messages_means_no_direct_response() {
    let outcome = LexOutcome {
        interpretations: vec![interpretation("AboutMe")],
        ..LexOutcome::default()
    };
    assert_eq!(direct_response(&outcome), None);
}

#[test]
fn fallback_intent_on_top_suppresses_direct_response() {
    let outcome = LexOutcome {
        messages: vec![plain_message("I can talk about my experience.")],
        interpretations: vec![interpretation(FALLBACK_INTENT), interpretation("AboutMe")],
        ..LexOutcome::default()
    };
    assert_eq!(direct_response(&outcome), None);
}

#[test]
fn error_phrasing_suppresses_direct_response() {
    let outcome = LexOutcome {
        messages: vec![plain_message(
            "Hmm, something went wrong while answering that.",
        )],
        interpretations: vec![interpretation("AboutMe")],
        ..LexOutcome::default()
    };
    assert_eq!(direct_response(&outcome), None);
}

#[test]
fn plain_text_messages_are_joined() {
    let outcome = LexOutcome {
        messages: vec![
            plain_message("I lead platform teams."),
            plain_message("Ask me about AWS."),
        ],
        interpretations: vec![interpretation("AboutMe")],
        ..LexOutcome::default()
    };
    assert_eq!(
        direct_response(&outcome),
        Some("I lead platform teams. Ask me about AWS.".to_string())
    );
}

#[test]
fn non_plain_text_content_is_ignored() {
    let outcome = LexOutcome {
        messages: vec![LexMessage {
            content: "card payload".to_string(),
            content_type: "ImageResponseCard".to_string(),
        }],
        interpretations: vec![interpretation("AboutMe")],
        ..LexOutcome::default()
    };
    assert_eq!(direct_response(&outcome), None);
}

#[test]
fn no_interpretations_does_not_block_direct_response() {
    let outcome = LexOutcome {
        messages: vec![plain_message("Here is what I do.")],
        ..LexOutcome::default()
    };
    assert_eq!(
        direct_response(&outcome),
        Some("Here is what I do.".to_string())
    );
}

#[test]
fn first_interpretation_with_slot_wins() {
    let outcome = LexOutcome {
        interpretations: vec![
            LexInterpretation {
                intent: Some(intent_with_slot("AboutMe", "person", "charlie")),
            },
            LexInterpretation {
                intent: Some(intent_with_slot("AboutMe", "person", "someone else")),
            },
        ],
        ..LexOutcome::default()
    };
    let slots = extract_slots(&outcome);
    assert_eq!(slots.person, Some("charlie".to_string()));
    assert_eq!(slots.question, None);
}

#[test]
fn slots_from_different_interpretations_are_combined() {
    let outcome = LexOutcome {
        interpretations: vec![
            LexInterpretation {
                intent: Some(intent_with_slot("AboutMe", "person", "charlie")),
            },
            LexInterpretation {
                intent: Some(intent_with_slot("AskQuestion", "question", "what is your story")),
            },
        ],
        ..LexOutcome::default()
    };
    let slots = extract_slots(&outcome);
    assert_eq!(slots.person, Some("charlie".to_string()));
    assert_eq!(slots.question, Some("what is your story".to_string()));
}

#[test]
fn blank_slot_values_are_skipped() {
    let outcome = LexOutcome {
        interpretations: vec![LexInterpretation {
            intent: Some(intent_with_slot("AboutMe", "question", "   ")),
        }],
        ..LexOutcome::default()
    };
    assert_eq!(extract_slots(&outcome).question, None);
}

#[test]
fn fallback_outcome_has_no_messages_and_fallback_intent() {
    let outcome = LexOutcome::fallback();
    assert!(outcome.messages.is_empty());
    assert_eq!(outcome.interpretations.len(), 1);
    assert_eq!(
        outcome.interpretations[0]
            .intent
            .as_ref()
            .map(|i| i.name.as_str()),
        Some(FALLBACK_INTENT)
    );
    assert_eq!(direct_response(&outcome), None);
}

//! parley-chat
//!
//! The chat pipeline: Lex first for intent recognition and canned
//! answers, Bedrock for everything Lex cannot answer, with the session
//! state threaded through and returned for the client to hold.

use tracing::{debug, info};

use parley_bedrock::invoke::{answer_question, AnswerRequest};
use parley_bedrock::persona::normalize_person_name;
use parley_core::models::session::{
    flatten_stored_question, trim_stored_answer, SessionState, VoiceStyle,
};
use parley_core::settings::Settings;
use parley_lex::LexOutcome;

/// Reply when neither a question slot nor usable free text was found.
/// The model is not called for these.
pub const NO_QUESTION_REPLY: &str =
    "I did not catch a question. Please ask me about experience, skills, or leadership style.";

/// Result of one processed chat message.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub reply: String,
    /// Updated state for the client to echo back on the next message.
    pub state: SessionState,
    /// Whether Lex answered directly, without a model call.
    pub lex_direct: bool,
}

/// Voice style for this turn. A style already stored in the session
/// wins over the request parameter; new sessions adopt the requested
/// style.
pub fn effective_voice_style(
    state: &SessionState,
    requested: Option<VoiceStyle>,
) -> VoiceStyle {
    state
        .current_voice_style
        .or(requested)
        .unwrap_or_default()
}

/// Processes one user message end to end.
///
/// Never fails: recognition errors fall back to the model, model errors
/// fall back to a static reply, and a message with no question in it is
/// answered with [`NO_QUESTION_REPLY`].
pub async fn process_chat(
    config: &aws_config::SdkConfig,
    settings: &Settings,
    session_id: &str,
    text: &str,
    mut state: SessionState,
    requested_style: Option<VoiceStyle>,
) -> ChatTurn {
    let outcome = if settings.lex_bot_id.is_empty() {
        debug!("lex not configured, skipping recognition");
        LexOutcome::fallback()
    } else {
        parley_lex::recognize_text(config, settings, session_id, text, &state).await
    };

    merge_lex_state(&mut state, &outcome);

    // Lex answered on its own: surface its message and keep the turn in
    // the history so the model sees it later.
    if let Some(direct) = parley_lex::direct_response(&outcome) {
        info!(session_id, "lex answered directly");
        state.last_question = Some(flatten_stored_question(text));
        state.last_answer = Some(trim_stored_answer(&direct));
        state.push_turn(text.trim(), direct.clone());
        return ChatTurn {
            reply: direct,
            state,
            lex_direct: true,
        };
    }

    let slots = parley_lex::extract_slots(&outcome);
    let person = normalize_person_name(slots.person.as_deref(), &settings.default_person);

    let Some(question) = choose_question(slots.question.as_deref(), text) else {
        debug!(session_id, "no question found in message");
        state.last_question = None;
        state.last_answer = None;
        return ChatTurn {
            reply: NO_QUESTION_REPLY.to_string(),
            state,
            lex_direct: false,
        };
    };

    let style = effective_voice_style(&state, requested_style);

    let answer = answer_question(
        config,
        settings,
        &AnswerRequest {
            person: &person,
            question: &question,
            history: &state.conversation_history,
            voice_style: style,
        },
    )
    .await;

    match answer.attributes {
        Some(attrs) => {
            state.push_turn(question.as_str(), answer.reply.as_str());
            state.last_question = Some(attrs.last_question);
            state.last_answer = Some(attrs.last_answer);
        }
        // The model call failed; forget the pair rather than remembering
        // the fallback text as an answer.
        None => {
            state.last_question = None;
            state.last_answer = None;
        }
    }
    state.current_voice_style = Some(style);

    info!(
        session_id,
        person,
        reply_chars = answer.reply.chars().count(),
        "chat turn answered by model"
    );
    ChatTurn {
        reply: answer.reply,
        state,
        lex_direct: false,
    }
}

/// The question to answer: the Lex slot when filled, otherwise the raw
/// message text, otherwise nothing.
fn choose_question(slot: Option<&str>, text: &str) -> Option<String> {
    if let Some(slot) = slot {
        let trimmed = slot.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Folds the Lex side of an outcome into the session state so it can be
/// replayed on the next turn. Application fields are left alone.
fn merge_lex_state(state: &mut SessionState, outcome: &LexOutcome) {
    state
        .session_attributes
        .extend(outcome.session_attributes.clone());
    if let Some(intent) = &outcome.intent {
        state.intent = Some(intent.clone());
    }
    if let Some(dialog_action) = &outcome.dialog_action {
        state.dialog_action = Some(dialog_action.clone());
    }
}

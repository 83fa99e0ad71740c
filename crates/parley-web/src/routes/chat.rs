use askama::Template;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;

use parley_analytics::EVENT_CHAT_PROCESSED;
use parley_chat::process_chat;
use parley_core::models::chat::{ChatMessage, ChatResponse};
use parley_core::models::session::{SessionState, VoiceStyle};

use crate::error::ApiError;
use crate::markdown;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub session_id: Option<String>,
    pub text: Option<String>,
    pub session_state: Option<String>,
    pub voice_style: Option<String>,
}

#[derive(Template)]
#[template(path = "chat_fragment.html")]
struct ChatFragmentTemplate {
    reply_html: String,
    session_state_json: String,
}

/// `POST /chat`. HTMX requests get an HTML fragment carrying the bot
/// bubble and the updated session state; API clients get JSON shaped
/// like a Lex runtime response.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Result<Response, ApiError> {
    let (Some(session_id), Some(text)) = (non_empty(form.session_id), non_empty(form.text)) else {
        return Err(ApiError::BadRequest(
            "session_id and text are required".to_string(),
        ));
    };

    let inbound = SessionState::from_client_json(form.session_state.as_deref());
    let requested_style = form.voice_style.as_deref().map(VoiceStyle::parse);

    let turn = process_chat(
        &state.aws,
        &state.settings,
        &session_id,
        &text,
        inbound,
        requested_style,
    )
    .await;

    state
        .analytics
        .capture(
            EVENT_CHAT_PROCESSED,
            Some(&session_id),
            json!({
                "question_length": text.chars().count(),
                "response_length": turn.reply.chars().count(),
                "voice_style": turn.state.current_voice_style.unwrap_or_default().as_str(),
                "lex_direct_response": turn.lex_direct,
            }),
        )
        .await;

    let session_state_json = turn.state.to_client_json()?;

    if headers.contains_key("hx-request") {
        let fragment = ChatFragmentTemplate {
            reply_html: markdown::render(&turn.reply),
            session_state_json,
        };
        Ok(Html(fragment.render()?).into_response())
    } else {
        Ok(Json(ChatResponse {
            messages: vec![ChatMessage::plain_text(turn.reply)],
            session_state: turn.state,
        })
        .into_response())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

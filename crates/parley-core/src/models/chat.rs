use serde::{Deserialize, Serialize};

use crate::models::session::SessionState;

/// JSON reply of `POST /chat` for non-HTMX clients. Shaped like a Lex
/// runtime response so existing Lex-aware clients can consume it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "sessionState")]
    pub session_state: SessionState,
}

/// One message in a [`ChatResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "contentType")]
    pub content_type: String,
    pub content: String,
}

impl ChatMessage {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: "PlainText".to_string(),
            content: content.into(),
        }
    }
}

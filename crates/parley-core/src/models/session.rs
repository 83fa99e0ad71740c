use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::lex::{DialogAction, LexIntent};

/// Turns of conversation history carried in the session state.
pub const MAX_HISTORY_TURNS: usize = 3;

/// Longest answer text stored in `last_answer`; longer replies are cut
/// and suffixed with `...`.
pub const MAX_STORED_ANSWER_CHARS: usize = 1200;

/// Conversation state round-tripped through the client on every chat
/// exchange. The server keeps nothing; whatever JSON the client echoes
/// back is the whole memory of the session.
///
/// Snake_case fields are private to the application. The camelCase
/// fields mirror the Lex V2 wire format so intent and slot context can
/// be replayed to Lex on the next turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_voice_style: Option<VoiceStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_answer: Option<String>,
    #[serde(
        rename = "sessionAttributes",
        default,
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub session_attributes: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<LexIntent>,
    #[serde(
        rename = "dialogAction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dialog_action: Option<DialogAction>,
}

impl SessionState {
    /// Parses the session state echoed back by the client.
    ///
    /// The client is untrusted: missing, empty, or malformed input
    /// resets to an empty state instead of erroring, so a corrupted
    /// payload only costs the conversation context.
    pub fn from_client_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Self>(trimmed) {
            Ok(mut state) => {
                state.enforce_history_bound();
                state
            }
            Err(_) => Self::default(),
        }
    }

    /// Serializes the state for embedding in a response to the client.
    pub fn to_client_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Appends a question/answer pair, dropping the oldest turn once
    /// the history bound is reached.
    pub fn push_turn(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.conversation_history.push(ConversationTurn {
            question: question.into(),
            answer: answer.into(),
        });
        self.enforce_history_bound();
    }

    fn enforce_history_bound(&mut self) {
        let len = self.conversation_history.len();
        if len > MAX_HISTORY_TURNS {
            self.conversation_history.drain(..len - MAX_HISTORY_TURNS);
        }
    }
}

/// One retained question/answer exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
}

/// Reply voice selected by the user. Unknown values deserialize to
/// `Normal` rather than failing the whole session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceStyle {
    Surfer,
    Pirate,
    Ninja,
    #[default]
    #[serde(other)]
    Normal,
}

impl VoiceStyle {
    /// Parses a request parameter, mapping unknown values to `Normal`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "surfer" => Self::Surfer,
            "pirate" => Self::Pirate,
            "ninja" => Self::Ninja,
            _ => Self::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Surfer => "surfer",
            Self::Pirate => "pirate",
            Self::Ninja => "ninja",
        }
    }
}

/// Normalizes an answer for storage in `last_answer`.
pub fn trim_stored_answer(answer: &str) -> String {
    let trimmed = answer.trim();
    if trimmed.chars().count() <= MAX_STORED_ANSWER_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(MAX_STORED_ANSWER_CHARS).collect();
    format!("{cut}...")
}

/// Normalizes a question for storage in `last_question`. Newlines are
/// flattened so the value stays a single line when rendered back into
/// a prompt.
pub fn flatten_stored_question(question: &str) -> String {
    question
        .trim()
        .replace(['\n', '\r'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

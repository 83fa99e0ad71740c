//! The model call for one chat turn.

use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::{debug, warn};

use parley_core::models::session::{
    flatten_stored_question, trim_stored_answer, ConversationTurn, VoiceStyle,
};
use parley_core::settings::Settings;

use crate::error::BedrockError;
use crate::{length, prompt, retrieve};

/// Reply returned when the model call fails for any reason.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble processing your request right now. Please try again.";

/// One question for the model, with the conversation it belongs to.
#[derive(Debug)]
pub struct AnswerRequest<'a> {
    pub person: &'a str,
    pub question: &'a str,
    pub history: &'a [ConversationTurn],
    pub voice_style: VoiceStyle,
}

/// The model's reply plus the memory the session should keep of it.
///
/// `attributes` is `None` when the call failed, which tells the caller
/// to clear the stored question/answer pair instead of remembering the
/// fallback text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub reply: String,
    pub attributes: Option<AnswerAttributes>,
}

/// Session memory of a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerAttributes {
    pub last_question: String,
    pub last_answer: String,
}

/// Answers a question with Bedrock.
///
/// Gathers knowledge base context when configured, renders the system
/// prompt, and runs a single Converse call with a token budget from the
/// length policy. Failures degrade to [`FALLBACK_REPLY`] rather than
/// erroring, the chat must always answer something.
pub async fn answer_question(
    config: &aws_config::SdkConfig,
    settings: &Settings,
    request: &AnswerRequest<'_>,
) -> AnswerOutcome {
    let kb_context = match settings.bedrock_kb_id.as_deref() {
        Some(kb_id) => retrieve::retrieve_kb_context(config, kb_id, request.question).await,
        None => None,
    };

    let template = settings
        .system_prompt_template
        .as_deref()
        .unwrap_or(prompt::DEFAULT_SYSTEM_PROMPT_TEMPLATE);
    let system_prompt = prompt::build_prompt(&prompt::PromptInputs {
        template,
        person: request.person,
        question: request.question,
        history: request.history,
        kb_context: kb_context.as_deref(),
        voice_style: request.voice_style,
    });

    let max_tokens = length::response_length(request.question, settings.bedrock_max_tokens);
    debug!(
        model_id = settings.bedrock_model_id,
        max_tokens,
        kb_context = kb_context.is_some(),
        "invoking model"
    );

    match converse(
        config,
        &settings.bedrock_model_id,
        &system_prompt,
        request.question,
        max_tokens,
    )
    .await
    {
        Ok(reply) => AnswerOutcome {
            attributes: Some(AnswerAttributes {
                last_question: flatten_stored_question(request.question),
                last_answer: trim_stored_answer(&reply),
            }),
            reply,
        },
        Err(e) => {
            warn!(error = %e, "model invocation failed, returning fallback reply");
            AnswerOutcome {
                reply: FALLBACK_REPLY.to_string(),
                attributes: None,
            }
        }
    }
}

/// One Converse round: system prompt plus a single user message.
async fn converse(
    config: &aws_config::SdkConfig,
    model_id: &str,
    system_prompt: &str,
    question: &str,
    max_tokens: u32,
) -> Result<String, BedrockError> {
    let client = aws_sdk_bedrockruntime::Client::new(config);

    let message = Message::builder()
        .role(ConversationRole::User)
        .content(ContentBlock::Text(question.to_string()))
        .build()
        .map_err(|e| BedrockError::Invocation(e.to_string()))?;

    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .messages(message)
        .inference_config(
            InferenceConfiguration::builder()
                .max_tokens(max_tokens as i32)
                .build(),
        )
        .send()
        .await
        .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| BedrockError::ResponseParse("no message in converse output".into()))?;

    let text = output_message
        .content()
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(BedrockError::ResponseParse(
            "converse output had no text content".into(),
        ));
    }
    Ok(text)
}

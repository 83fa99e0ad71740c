//! System prompt assembly.
//!
//! The prompt is rendered from a template with `{person}`, `{context}`
//! and `{question}` placeholders. Context is whatever the session
//! remembers plus anything the knowledge base returned, and a voice and
//! conciseness directive is spliced in right after the template's
//! opening line.

use rand::Rng;

use parley_core::models::session::{ConversationTurn, VoiceStyle};

use crate::persona;

/// Template used when `SYSTEM_PROMPT_TEMPLATE` is not set.
pub const DEFAULT_SYSTEM_PROMPT_TEMPLATE: &str = "\
You are Parley, the portfolio assistant speaking as {person}, a software engineer and technical leader with extensive experience in:
- AWS cloud architecture and serverless services (Lambda, Bedrock, Lex)
- Backend development and web services
- Infrastructure as code and CI/CD automation
- Full-stack web development
- Engineering leadership and mentoring

Answer in the first person, as {person}. Keep answers factual and grounded in the context below. If something is not covered by what you know about {person}, say so instead of inventing details.

{context}

Question: {question}";

/// The three conciseness directives, one of which is chosen per call.
pub const CONCISENESS_STYLES: [&str; 3] = [
    "very concise (around 300-500 characters)",
    "concise (around 500-700 characters)",
    "medium (around 700-900 characters)",
];

/// Everything that feeds one rendered prompt.
#[derive(Debug)]
pub struct PromptInputs<'a> {
    pub template: &'a str,
    pub person: &'a str,
    pub question: &'a str,
    pub history: &'a [ConversationTurn],
    pub kb_context: Option<&'a str>,
    pub voice_style: VoiceStyle,
}

/// Renders the system prompt for one question.
pub fn build_prompt(inputs: &PromptInputs<'_>) -> String {
    let mut context = conversation_context(inputs.history);
    if let Some(kb) = inputs.kb_context {
        if !kb.trim().is_empty() {
            if !context.is_empty() {
                context.push('\n');
            }
            context.push_str("Additional context from knowledge base:\n");
            context.push_str(kb.trim());
        }
    }

    let rendered = inputs
        .template
        .replace("{person}", inputs.person)
        .replace("{context}", context.trim_end())
        .replace("{question}", inputs.question);

    insert_style_directives(&rendered, inputs.voice_style)
}

/// Renders retained history as alternating previous question/answer
/// lines, oldest first. Empty on the first interaction.
fn conversation_context(history: &[ConversationTurn]) -> String {
    let mut out = String::new();
    for turn in history {
        let question = turn.question.trim();
        let answer = turn.answer.trim();
        if question.is_empty() || answer.is_empty() {
            continue;
        }
        out.push_str("Previous question: ");
        out.push_str(question);
        out.push('\n');
        out.push_str("Previous answer: ");
        out.push_str(answer);
        out.push('\n');
    }
    out
}

/// Splices the voice and conciseness directives in after the first
/// template line, so they sit next to the persona statement instead of
/// trailing the whole prompt.
fn insert_style_directives(prompt: &str, style: VoiceStyle) -> String {
    let mut directives = String::new();
    let voice = persona::voice_instructions(style);
    if !voice.is_empty() {
        directives.push_str(voice);
        directives.push(' ');
    }
    directives.push_str("Keep the answer ");
    directives.push_str(random_conciseness_style());
    directives.push('.');

    match prompt.split_once('\n') {
        Some((first_line, rest)) => format!("{first_line}\n\n{directives}\n{rest}"),
        None => format!("{prompt}\n\n{directives}"),
    }
}

fn random_conciseness_style() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..CONCISENESS_STYLES.len());
    CONCISENESS_STYLES[idx]
}

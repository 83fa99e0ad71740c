//! Knowledge base retrieval.
//!
//! Pulls supporting passages for a question from a Bedrock knowledge
//! base. Retrieval is strictly best-effort: any failure or empty result
//! turns into `None` and the chat continues without extra context.

use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration,
    KnowledgeBaseVectorSearchConfiguration,
};
use tracing::{debug, warn};

use crate::error::BedrockError;

/// Passages kept from a retrieval response.
const MAX_PASSAGES: usize = 5;

/// Longest context block handed to the prompt; longer text is cut and
/// suffixed with `...`.
const MAX_CONTEXT_CHARS: usize = 1500;

const BACKGROUND_KEYWORDS: [&str; 7] = [
    "background",
    "experience",
    "career",
    "tell me about yourself",
    "overview",
    "history",
    "story",
];

const SPECIFIC_KEYWORDS: [&str; 9] = [
    "education",
    "skills",
    "certifications",
    "degree",
    "school",
    "what is",
    "what are",
    "list",
    "show me",
];

/// How a question steers retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionClass {
    Background,
    Specific,
    General,
}

fn classify(question: &str) -> QuestionClass {
    let q = question.to_lowercase();
    if BACKGROUND_KEYWORDS.iter().any(|w| q.contains(w)) {
        QuestionClass::Background
    } else if SPECIFIC_KEYWORDS.iter().any(|w| q.contains(w)) {
        QuestionClass::Specific
    } else {
        QuestionClass::General
    }
}

/// Passage count requested from the knowledge base. Broad background
/// questions pull one more passage than pointed ones.
pub fn number_of_results(question: &str) -> i32 {
    match classify(question) {
        QuestionClass::Background => 3,
        QuestionClass::Specific | QuestionClass::General => 2,
    }
}

/// Retrieves knowledge base context for a question, or `None` when
/// nothing usable came back.
pub async fn retrieve_kb_context(
    config: &aws_config::SdkConfig,
    kb_id: &str,
    question: &str,
) -> Option<String> {
    match retrieve(config, kb_id, question).await {
        Ok(Some(context)) => Some(context),
        Ok(None) => {
            debug!(kb_id, "knowledge base returned no usable passages");
            None
        }
        Err(e) => {
            warn!(kb_id, error = %e, "knowledge base retrieval failed, continuing without context");
            None
        }
    }
}

async fn retrieve(
    config: &aws_config::SdkConfig,
    kb_id: &str,
    question: &str,
) -> Result<Option<String>, BedrockError> {
    let client = aws_sdk_bedrockagentruntime::Client::new(config);

    let query = KnowledgeBaseQuery::builder().text(question).build();
    let vector_search = KnowledgeBaseVectorSearchConfiguration::builder()
        .number_of_results(number_of_results(question))
        .build();
    let retrieval_config = KnowledgeBaseRetrievalConfiguration::builder()
        .vector_search_configuration(vector_search)
        .build();

    let resp = client
        .retrieve()
        .knowledge_base_id(kb_id)
        .retrieval_query(query)
        .retrieval_configuration(retrieval_config)
        .send()
        .await
        .map_err(|e| BedrockError::Retrieval(e.into_service_error().to_string()))?;

    let passages: Vec<&str> = resp
        .retrieval_results()
        .iter()
        .filter_map(|r| r.content().map(|c| c.text()))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .take(MAX_PASSAGES)
        .collect();

    if passages.is_empty() {
        return Ok(None);
    }
    Ok(Some(truncate_context(&passages.join("\n"))))
}

fn truncate_context(text: &str) -> String {
    if text.chars().count() <= MAX_CONTEXT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_CONTEXT_CHARS).collect();
    format!("{cut}...")
}

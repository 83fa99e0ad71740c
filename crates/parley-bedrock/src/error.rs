use thiserror::Error;

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("failed to parse model response: {0}")]
    ResponseParse(String),

    #[error("knowledge base retrieval failed: {0}")]
    Retrieval(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("lex API error: {0}")]
    Api(String),

    #[error("failed to rebuild session state for replay: {0}")]
    Replay(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback text is required")]
    EmptyFeedback,

    #[error("feedback exceeds {0} character limit")]
    TooLong(usize),

    #[error("invalid experience value: {0}")]
    InvalidExperience(String),

    #[error("email sender or recipient not configured")]
    MissingEmailConfig,

    #[error("SES send failed: {0}")]
    Ses(String),
}

impl FeedbackError {
    /// Validation failures are the caller's fault and map to 400.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyFeedback | Self::TooLong(_) | Self::InvalidExperience(_)
        )
    }
}

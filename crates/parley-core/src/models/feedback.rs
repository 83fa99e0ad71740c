use serde::{Deserialize, Serialize};

/// A feedback form submission. `experience` stays a raw string here so
/// validation can reject bad values with a useful message instead of a
/// deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub feedback: String,
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Validated experience rating of a feedback submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    Positive,
    Neutral,
    Negative,
}

impl Experience {
    /// Parses the wire value, which must be exactly one of `positive`,
    /// `neutral`, or `negative`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "positive" => Some(Self::Positive),
            "neutral" => Some(Self::Neutral),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Capitalized label used in the email subject and body.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Positive => "\u{1F44D}",
            Self::Neutral => "\u{1F610}",
            Self::Negative => "\u{1F44E}",
        }
    }
}

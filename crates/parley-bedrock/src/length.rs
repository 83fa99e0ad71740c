//! Reply length policy.
//!
//! Token budgets are picked from the shape of the question, so a bare
//! greeting gets a short reply and a "tell me everything" question gets
//! a long one. Every budget is capped by the configured maximum.

/// Messages that are exactly a greeting or acknowledgement.
const GREETINGS: [&str; 13] = [
    "hi", "hello", "hey", "thank", "thanks", "thank you", "yes", "no", "ok", "okay", "sure",
    "yep", "nope",
];

/// Factual attribute questions get room for lists.
const ATTRIBUTE_KEYWORDS: [&str; 9] = [
    "education",
    "degree",
    "school",
    "university",
    "college",
    "skills",
    "certifications",
    "cert",
    "certificate",
];

/// Direct wh-questions get a medium budget.
const WH_KEYWORDS: [&str; 7] = ["what", "how", "when", "where", "why", "which", "who"];

/// Broad background questions get the full budget.
const BACKGROUND_KEYWORDS: [&str; 8] = [
    "tell me about yourself",
    "background",
    "experience",
    "career",
    "overview",
    "story",
    "history",
    "everything",
];

/// Token budget for a reply to `question`, never exceeding `max_tokens`.
pub fn response_length(question: &str, max_tokens: u32) -> u32 {
    let q = question.trim().to_lowercase();

    let budget = if GREETINGS.contains(&q.as_str()) {
        100
    } else if ATTRIBUTE_KEYWORDS.iter().any(|w| q.contains(w)) {
        700
    } else if WH_KEYWORDS.iter().any(|w| q.contains(w)) {
        600
    } else if BACKGROUND_KEYWORDS.iter().any(|w| q.contains(w)) {
        700
    } else {
        500
    };
    budget.min(max_tokens)
}

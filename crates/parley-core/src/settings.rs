use std::env;

/// Runtime configuration for every Parley component, resolved once at
/// startup from environment variables.
///
/// Loading never fails: unset variables fall back to defaults and values
/// that do not parse are replaced by the default rather than aborting.
/// Optional integrations (Lex, the knowledge base, feedback email,
/// PostHog) are disabled by leaving their variables unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `AWS_REGION`, used for every AWS client.
    pub aws_region: String,
    /// `LEX_BOT_ID`. Empty disables Lex entirely.
    pub lex_bot_id: String,
    /// `LEX_BOT_ALIAS_ID`.
    pub lex_bot_alias_id: String,
    /// `LEX_BOT_LOCALE_ID`.
    pub lex_locale_id: String,
    /// `BEDROCK_MODEL_ID`.
    pub bedrock_model_id: String,
    /// `BEDROCK_MAX_TOKENS`, upper bound for any reply.
    pub bedrock_max_tokens: u32,
    /// `BEDROCK_KB_ID`. Unset skips knowledge-base retrieval.
    pub bedrock_kb_id: Option<String>,
    /// `DEFAULT_PERSON`, the persona used when no person slot is given.
    pub default_person: String,
    /// `SYSTEM_PROMPT_TEMPLATE`. Unset uses the built-in template.
    pub system_prompt_template: Option<String>,
    /// `CANONICAL_HOST`. When set, `www.<host>` requests are redirected.
    pub canonical_host: Option<String>,
    /// `FEEDBACK_SENDER_EMAIL`.
    pub feedback_sender: Option<String>,
    /// `FEEDBACK_RECIPIENT_EMAIL`.
    pub feedback_recipient: Option<String>,
    /// `POSTHOG_API_KEY`. Unset disables analytics capture.
    pub posthog_api_key: Option<String>,
    /// `POSTHOG_HOST`.
    pub posthog_host: String,
    /// `JOURNAL_DIR`, directory of markdown journal entries.
    pub journal_dir: String,
    /// `STATIC_DIR`, directory served under `/static`.
    pub static_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aws_region: "us-east-1".to_string(),
            lex_bot_id: String::new(),
            lex_bot_alias_id: "TSTALIASID".to_string(),
            lex_locale_id: "en_US".to_string(),
            bedrock_model_id: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            bedrock_max_tokens: 500,
            bedrock_kb_id: None,
            default_person: "Charles".to_string(),
            system_prompt_template: None,
            canonical_host: None,
            feedback_sender: None,
            feedback_recipient: None,
            posthog_api_key: None,
            posthog_host: "https://app.posthog.com".to_string(),
            journal_dir: "journal".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            aws_region: string_or(&defaults.aws_region, "AWS_REGION"),
            lex_bot_id: env::var("LEX_BOT_ID").unwrap_or_default(),
            lex_bot_alias_id: string_or(&defaults.lex_bot_alias_id, "LEX_BOT_ALIAS_ID"),
            lex_locale_id: string_or(&defaults.lex_locale_id, "LEX_BOT_LOCALE_ID"),
            bedrock_model_id: string_or(&defaults.bedrock_model_id, "BEDROCK_MODEL_ID"),
            bedrock_max_tokens: parse_or(defaults.bedrock_max_tokens, "BEDROCK_MAX_TOKENS"),
            bedrock_kb_id: optional("BEDROCK_KB_ID"),
            default_person: string_or(&defaults.default_person, "DEFAULT_PERSON"),
            system_prompt_template: optional("SYSTEM_PROMPT_TEMPLATE"),
            canonical_host: optional("CANONICAL_HOST"),
            feedback_sender: optional("FEEDBACK_SENDER_EMAIL"),
            feedback_recipient: optional("FEEDBACK_RECIPIENT_EMAIL"),
            posthog_api_key: optional("POSTHOG_API_KEY"),
            posthog_host: string_or(&defaults.posthog_host, "POSTHOG_HOST"),
            journal_dir: string_or(&defaults.journal_dir, "JOURNAL_DIR"),
            static_dir: string_or(&defaults.static_dir, "STATIC_DIR"),
        }
    }
}

/// Value of `key`, or `default` when unset or empty.
fn string_or(default: &str, key: &str) -> String {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Value of `key` when set and non-empty.
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parsed value of `key`, or `default` when unset or not a number.
fn parse_or(default: u32, key: &str) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

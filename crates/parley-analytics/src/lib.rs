//! parley-analytics
//!
//! PostHog event capture for the web layer. The client only goes live
//! inside Lambda with an API key configured; everywhere else every call
//! is a no-op, so local runs and tests never produce network traffic.

use std::time::Duration;

use parley_core::settings::Settings;
use serde_json::{Value, json};

/// Emitted after each chat turn completes.
pub const EVENT_CHAT_PROCESSED: &str = "chat_message_processed";

/// Emitted after a feedback submission is accepted.
pub const EVENT_FEEDBACK_SUBMITTED: &str = "feedback_submitted";

const CAPTURE_TIMEOUT: Duration = Duration::from_secs(2);

/// PostHog capture client. A disabled instance answers every capture
/// with `false` without touching the network.
#[derive(Debug, Clone)]
pub struct Analytics {
    client: Option<reqwest::Client>,
    api_key: Option<String>,
    host: String,
}

impl Analytics {
    /// Builds a capture client. Capture is enabled only when running in
    /// Lambda with an API key configured.
    pub fn new(api_key: Option<String>, host: String, in_lambda: bool) -> Self {
        if !in_lambda {
            tracing::info!("analytics disabled: not running in Lambda");
            return Self::disabled(host);
        }
        let Some(api_key) = api_key else {
            tracing::warn!("analytics disabled: POSTHOG_API_KEY not set");
            return Self::disabled(host);
        };
        match reqwest::Client::builder().timeout(CAPTURE_TIMEOUT).build() {
            Ok(client) => {
                tracing::info!("analytics enabled");
                Self {
                    client: Some(client),
                    api_key: Some(api_key),
                    host,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "analytics disabled: HTTP client build failed");
                Self::disabled(host)
            }
        }
    }

    /// Builds a capture client from settings, detecting Lambda through
    /// `AWS_EXECUTION_ENV`.
    pub fn from_settings(settings: &Settings) -> Self {
        let in_lambda = std::env::var("AWS_EXECUTION_ENV").is_ok();
        Self::new(
            settings.posthog_api_key.clone(),
            settings.posthog_host.clone(),
            in_lambda,
        )
    }

    fn disabled(host: String) -> Self {
        Self {
            client: None,
            api_key: None,
            host,
        }
    }

    pub fn enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Sends one event to PostHog and reports whether it went out.
    /// Failures are logged and swallowed, a capture can never fail the
    /// request that triggered it.
    pub async fn capture(&self, event: &str, distinct_id: Option<&str>, properties: Value) -> bool {
        let (Some(client), Some(api_key)) = (&self.client, &self.api_key) else {
            tracing::debug!(event, "analytics disabled, event not captured");
            return false;
        };

        let distinct_id = distinct_id.unwrap_or("anonymous");
        let body = json!({
            "api_key": api_key,
            "event": event,
            "distinct_id": distinct_id,
            "properties": with_lambda_context(properties),
        });

        let url = format!("{}/capture/", self.host.trim_end_matches('/'));
        match client.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(event, distinct_id, "analytics event captured");
                true
            }
            Ok(response) => {
                tracing::warn!(event, status = %response.status(), "analytics capture rejected");
                false
            }
            Err(e) => {
                tracing::warn!(event, error = %e, "analytics capture failed");
                false
            }
        }
    }
}

/// Tags event properties with the Lambda runtime context.
fn with_lambda_context(properties: Value) -> Value {
    let mut map = match properties {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    for (field, var) in [
        ("lambda_function", "AWS_LAMBDA_FUNCTION_NAME"),
        ("lambda_version", "AWS_LAMBDA_FUNCTION_VERSION"),
        ("aws_region", "AWS_REGION"),
    ] {
        let value = std::env::var(var).unwrap_or_else(|_| "unknown".to_string());
        map.insert(field.to_string(), Value::String(value));
    }
    Value::Object(map)
}

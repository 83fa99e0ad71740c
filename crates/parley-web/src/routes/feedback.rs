use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use jiff::{SignedDuration, Timestamp};
use serde_json::{Value, json};
use tracing::info;

use parley_analytics::EVENT_FEEDBACK_SUBMITTED;
use parley_core::models::feedback::FeedbackSubmission;
use parley_feedback::{send_feedback_email, validate};

use crate::error::ApiError;
use crate::state::AppState;

const MAX_SUBMISSIONS: usize = 3;
const WINDOW_MINUTES: i64 = 10;

/// Per-instance sliding-window limiter: 3 submissions per 10 minutes
/// per client IP. State lives in process memory, so each Lambda
/// instance counts on its own.
#[derive(Debug, Default)]
pub struct FeedbackRateLimiter {
    submissions: HashMap<String, Vec<Timestamp>>,
}

impl FeedbackRateLimiter {
    /// Whether `client` may submit at `now`. Entries outside the window
    /// are pruned on every check.
    pub fn check(&mut self, client: &str, now: Timestamp) -> bool {
        let cutoff = now - SignedDuration::from_mins(WINDOW_MINUTES);
        let entries = self.submissions.entry(client.to_string()).or_default();
        entries.retain(|t| *t > cutoff);
        entries.len() < MAX_SUBMISSIONS
    }

    pub fn record(&mut self, client: &str, now: Timestamp) {
        self.submissions
            .entry(client.to_string())
            .or_default()
            .push(now);
    }
}

/// `POST /feedback`. Validates, rate limits by client IP, then emails
/// the submission when SES is configured; otherwise it is only logged.
pub async fn feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let client = client_ip(&headers);
    {
        let mut limiter = state.feedback_limiter.lock().await;
        if !limiter.check(&client, Timestamp::now()) {
            return Err(ApiError::TooManyRequests(
                "Rate limit exceeded. Maximum 3 feedback submissions per 10 minutes.".to_string(),
            ));
        }
    }

    let submission: FeedbackSubmission = serde_json::from_slice(&body)?;
    let experience = validate(&submission)?;

    {
        let mut limiter = state.feedback_limiter.lock().await;
        limiter.record(&client, Timestamp::now());
    }

    if state.settings.feedback_sender.is_some() && state.settings.feedback_recipient.is_some() {
        send_feedback_email(&state.aws, &state.settings, &submission).await?;
    } else {
        info!(
            experience = experience.as_str(),
            "feedback received (email not configured)"
        );
    }

    state
        .analytics
        .capture(
            EVENT_FEEDBACK_SUBMITTED,
            None,
            json!({"experience": experience.as_str()}),
        )
        .await;

    Ok(Json(json!({
        "message": "Feedback submitted successfully",
        "status": "success"
    })))
}

/// Client address for rate limiting: first entry of `x-forwarded-for`
/// (set by API Gateway), else `unknown`.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

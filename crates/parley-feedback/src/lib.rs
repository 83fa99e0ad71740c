//! parley-feedback
//!
//! Feedback submissions: validation, email formatting, and delivery via
//! Amazon SES. Shared by the web layer's `/feedback` route and the
//! standalone Lambda in `main.rs`.

pub mod error;

use aws_sdk_sesv2::Client;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use tracing::info;

use parley_core::models::feedback::{Experience, FeedbackSubmission};
use parley_core::settings::Settings;

use crate::error::FeedbackError;

/// Upper bound on feedback text length, counted in characters.
pub const MAX_FEEDBACK_LEN: usize = 300;

/// Checks a submission and resolves its experience rating.
pub fn validate(submission: &FeedbackSubmission) -> Result<Experience, FeedbackError> {
    let feedback = submission.feedback.trim();
    if feedback.is_empty() {
        return Err(FeedbackError::EmptyFeedback);
    }
    if feedback.chars().count() > MAX_FEEDBACK_LEN {
        return Err(FeedbackError::TooLong(MAX_FEEDBACK_LEN));
    }
    let experience = submission.experience.trim();
    Experience::parse(experience).ok_or_else(|| FeedbackError::InvalidExperience(experience.to_string()))
}

/// Renders the notification email as a subject and plain-text body.
pub fn build_email(submission: &FeedbackSubmission, experience: Experience) -> (String, String) {
    let subject = format!(
        "Parley Feedback - {} {}",
        experience.emoji(),
        experience.label()
    );
    let name = submission
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("N/A");
    let body = format!(
        "New feedback received from Parley:\n\n\
         Feedback: {}\n\n\
         Experience: {} {}\n\
         Name: {}\n\n\
         ---\n\
         Sent from Parley feedback form",
        submission.feedback.trim(),
        experience.emoji(),
        experience.label(),
        name
    );
    (subject, body)
}

/// Validates a submission and mails it to the configured recipient.
/// Returns the SES message id.
pub async fn send_feedback_email(
    config: &aws_config::SdkConfig,
    settings: &Settings,
    submission: &FeedbackSubmission,
) -> Result<String, FeedbackError> {
    let experience = validate(submission)?;

    let (Some(sender), Some(recipient)) = (&settings.feedback_sender, &settings.feedback_recipient)
    else {
        return Err(FeedbackError::MissingEmailConfig);
    };

    let (subject, body) = build_email(submission, experience);

    let message = Message::builder()
        .subject(utf8_content(&subject)?)
        .body(Body::builder().text(utf8_content(&body)?).build())
        .build();

    let client = Client::new(config);
    let response = client
        .send_email()
        .from_email_address(sender)
        .destination(Destination::builder().to_addresses(recipient).build())
        .content(EmailContent::builder().simple(message).build())
        .send()
        .await
        .map_err(|e| FeedbackError::Ses(e.into_service_error().to_string()))?;

    let message_id = response.message_id().unwrap_or_default().to_string();
    info!(message_id = %message_id, experience = experience.as_str(), "feedback email sent");
    Ok(message_id)
}

fn utf8_content(data: &str) -> Result<Content, FeedbackError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| FeedbackError::Ses(e.to_string()))
}

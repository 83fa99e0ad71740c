use parley_core::models::feedback::{Experience, FeedbackSubmission};
use parley_core::settings::Settings;
use parley_feedback::error::FeedbackError;
use parley_feedback::{MAX_FEEDBACK_LEN, build_email, send_feedback_email, validate};

fn submission(feedback: &str, experience: &str, name: Option<&str>) -> FeedbackSubmission {
    FeedbackSubmission {
        feedback: feedback.to_string(),
        experience: experience.to_string(),
        name: name.map(str::to_string),
    }
}

#[test]
fn empty_feedback_is_rejected() {
    let err = validate(&submission("", "positive", None)).unwrap_err();
    assert!(matches!(err, FeedbackError::EmptyFeedback));
}

#[test]
fn whitespace_only_feedback_is_rejected() {
    let err = validate(&submission("   \n", "positive", None)).unwrap_err();
    assert!(matches!(err, FeedbackError::EmptyFeedback));
}

#[test]
fn overlong_feedback_is_rejected() {
    let text = "x".repeat(MAX_FEEDBACK_LEN + 1);
    let err = validate(&submission(&text, "neutral", None)).unwrap_err();
    assert!(matches!(err, FeedbackError::TooLong(_)));
}

#[test]
fn feedback_at_the_limit_passes() {
    let text = "x".repeat(MAX_FEEDBACK_LEN);
    let experience = validate(&submission(&text, "neutral", None)).expect("valid submission");
    assert_eq!(experience, Experience::Neutral);
}

#[test]
fn unknown_experience_is_rejected() {
    let err = validate(&submission("great chat", "amazing", None)).unwrap_err();
    match err {
        FeedbackError::InvalidExperience(raw) => assert_eq!(raw, "amazing"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn all_three_experiences_validate() {
    for (raw, expected) in [
        ("positive", Experience::Positive),
        ("neutral", Experience::Neutral),
        ("negative", Experience::Negative),
    ] {
        let experience = validate(&submission("great chat", raw, None)).expect("valid submission");
        assert_eq!(experience, expected);
    }
}

#[test]
fn email_carries_the_submission() {
    let sub = submission("Loved the pirate mode", "positive", Some("Dana"));
    let (subject, body) = build_email(&sub, Experience::Positive);
    assert_eq!(subject, "Parley Feedback - \u{1F44D} Positive");
    assert!(body.starts_with("New feedback received from Parley:"));
    assert!(body.contains("Feedback: Loved the pirate mode"));
    assert!(body.contains("Experience: \u{1F44D} Positive"));
    assert!(body.contains("Name: Dana"));
    assert!(body.ends_with("Sent from Parley feedback form"));
}

#[test]
fn missing_or_blank_name_shows_as_not_available() {
    let (_, body) = build_email(&submission("Solid answers", "neutral", None), Experience::Neutral);
    assert!(body.contains("Name: N/A"));

    let (_, body) = build_email(
        &submission("Solid answers", "neutral", Some("   ")),
        Experience::Neutral,
    );
    assert!(body.contains("Name: N/A"));
}

#[tokio::test]
async fn unconfigured_email_fails_before_any_send() {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .load()
        .await;
    let settings = Settings::default();
    let err = send_feedback_email(&config, &settings, &submission("great chat", "positive", None))
        .await
        .unwrap_err();
    assert!(matches!(err, FeedbackError::MissingEmailConfig));
}

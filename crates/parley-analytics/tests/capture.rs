use parley_analytics::{Analytics, EVENT_CHAT_PROCESSED};
use serde_json::json;

#[test]
fn stays_disabled_outside_lambda() {
    let analytics = Analytics::new(
        Some("phc_test".to_string()),
        "https://app.posthog.com".to_string(),
        false,
    );
    assert!(!analytics.enabled());
}

#[test]
fn stays_disabled_without_an_api_key() {
    let analytics = Analytics::new(None, "https://app.posthog.com".to_string(), true);
    assert!(!analytics.enabled());
}

#[test]
fn enables_in_lambda_with_an_api_key() {
    let analytics = Analytics::new(
        Some("phc_test".to_string()),
        "https://app.posthog.com".to_string(),
        true,
    );
    assert!(analytics.enabled());
}

#[tokio::test]
async fn disabled_capture_reports_false() {
    let analytics = Analytics::new(None, "https://app.posthog.com".to_string(), false);
    let sent = analytics
        .capture(
            EVENT_CHAT_PROCESSED,
            Some("web-alpha-0000"),
            json!({"question_length": 12}),
        )
        .await;
    assert!(!sent);
}

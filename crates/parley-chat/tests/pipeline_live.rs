//! Integration tests for the full chat pipeline.
//!
//! These tests call real AWS APIs and require valid credentials in the
//! environment plus Bedrock model access. Lex is exercised only when
//! `LEX_BOT_ID` is set; otherwise the pipeline goes straight to the
//! model, which is also the production shape for a Lex-less deploy.
//!
//! Run with: `cargo test -p parley-chat --test pipeline_live -- --ignored`

use parley_chat::process_chat;
use parley_core::models::session::{SessionState, VoiceStyle};
use parley_core::settings::Settings;

async fn build_config(settings: &Settings) -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.aws_region.clone()))
        .load()
        .await
}

#[tokio::test]
#[ignore]
async fn two_turns_accumulate_history() {
    let settings = Settings::from_env();
    let config = build_config(&settings).await;

    let turn1 = process_chat(
        &config,
        &settings,
        "pipeline-test",
        "tell me about your skills",
        SessionState::default(),
        Some(VoiceStyle::Normal),
    )
    .await;
    println!("turn 1: {}", turn1.reply);
    assert_eq!(turn1.state.conversation_history.len(), 1);
    assert_eq!(
        turn1.state.conversation_history[0].question,
        "tell me about your skills"
    );
    assert_eq!(turn1.state.current_voice_style, Some(VoiceStyle::Normal));

    let json = turn1.state.to_client_json().expect("serialize state");
    let echoed = SessionState::from_client_json(Some(&json));

    let turn2 = process_chat(
        &config,
        &settings,
        "pipeline-test",
        "how do you lead teams",
        echoed,
        None,
    )
    .await;
    println!("turn 2: {}", turn2.reply);
    assert_eq!(turn2.state.conversation_history.len(), 2);
    assert_eq!(
        turn2.state.last_question.as_deref(),
        Some("how do you lead teams")
    );
}

#[tokio::test]
#[ignore]
async fn voice_style_sticks_to_the_session() {
    let settings = Settings::from_env();
    let config = build_config(&settings).await;

    let turn1 = process_chat(
        &config,
        &settings,
        "pipeline-style-test",
        "what do you do",
        SessionState::default(),
        Some(VoiceStyle::Pirate),
    )
    .await;
    assert_eq!(turn1.state.current_voice_style, Some(VoiceStyle::Pirate));

    // A different requested style does not displace the stored one.
    let turn2 = process_chat(
        &config,
        &settings,
        "pipeline-style-test",
        "what else do you do",
        turn1.state,
        Some(VoiceStyle::Surfer),
    )
    .await;
    assert_eq!(turn2.state.current_voice_style, Some(VoiceStyle::Pirate));
}

use parley_bedrock::prompt::{
    build_prompt, PromptInputs, CONCISENESS_STYLES, DEFAULT_SYSTEM_PROMPT_TEMPLATE,
};
use parley_core::models::session::{ConversationTurn, VoiceStyle};

fn inputs<'a>(
    question: &'a str,
    history: &'a [ConversationTurn],
    kb_context: Option<&'a str>,
    voice_style: VoiceStyle,
) -> PromptInputs<'a> {
    PromptInputs {
        template: DEFAULT_SYSTEM_PROMPT_TEMPLATE,
        person: "Charles",
        question,
        history,
        kb_context,
        voice_style,
    }
}

#[test]
fn substitutes_person_and_question() {
    let prompt = build_prompt(&inputs("what do you build", &[], None, VoiceStyle::Normal));
    assert!(prompt.contains("Charles"));
    assert!(prompt.contains("Question: what do you build"));
    assert!(!prompt.contains("{person}"));
    assert!(!prompt.contains("{question}"));
    assert!(!prompt.contains("{context}"));
}

#[test]
fn first_interaction_has_no_history_lines() {
    let prompt = build_prompt(&inputs("what do you build", &[], None, VoiceStyle::Normal));
    assert!(!prompt.contains("Previous question:"));
    assert!(!prompt.contains("Previous answer:"));
}

#[test]
fn history_renders_most_recent_last() {
    let history = vec![
        ConversationTurn {
            question: "first question".to_string(),
            answer: "first answer".to_string(),
        },
        ConversationTurn {
            question: "second question".to_string(),
            answer: "second answer".to_string(),
        },
    ];
    let prompt = build_prompt(&inputs("third question", &history, None, VoiceStyle::Normal));
    let first = prompt.find("Previous question: first question").expect("first turn");
    let second = prompt
        .find("Previous question: second question")
        .expect("second turn");
    assert!(first < second);
    assert!(prompt.contains("Previous answer: first answer"));
    assert!(prompt.contains("Previous answer: second answer"));
}

#[test]
fn blank_history_turns_are_skipped() {
    let history = vec![ConversationTurn {
        question: "   ".to_string(),
        answer: "an answer".to_string(),
    }];
    let prompt = build_prompt(&inputs("q", &history, None, VoiceStyle::Normal));
    assert!(!prompt.contains("Previous question:"));
}

#[test]
fn kb_context_is_prefixed() {
    let prompt = build_prompt(&inputs(
        "what certs do you hold",
        &[],
        Some("AWS Solutions Architect, 2021."),
        VoiceStyle::Normal,
    ));
    assert!(prompt.contains("Additional context from knowledge base:\nAWS Solutions Architect, 2021."));
}

#[test]
fn history_comes_before_kb_context() {
    let history = vec![ConversationTurn {
        question: "q1".to_string(),
        answer: "a1".to_string(),
    }];
    let prompt = build_prompt(&inputs("q2", &history, Some("kb passage"), VoiceStyle::Normal));
    let history_pos = prompt.find("Previous question: q1").expect("history");
    let kb_pos = prompt
        .find("Additional context from knowledge base:")
        .expect("kb block");
    assert!(history_pos < kb_pos);
}

#[test]
fn voice_instructions_sit_after_the_first_line() {
    let prompt = build_prompt(&inputs("what do you do", &[], None, VoiceStyle::Surfer));
    let first_line = prompt.lines().next().expect("first line");
    assert!(!first_line.contains("surfer"));
    let directive_line = prompt
        .lines()
        .find(|l| l.contains("surfer tone"))
        .expect("directive line");
    assert!(directive_line.contains("Keep the answer"));
    // The directive precedes the expertise bullets from the template.
    let directive_pos = prompt.find("surfer tone").expect("directive");
    let bullets_pos = prompt.find("- AWS cloud").expect("bullets");
    assert!(directive_pos < bullets_pos);
}

#[test]
fn normal_voice_still_gets_a_conciseness_hint() {
    let prompt = build_prompt(&inputs("what do you do", &[], None, VoiceStyle::Normal));
    assert!(
        CONCISENESS_STYLES.iter().any(|s| prompt.contains(s)),
        "expected one of the conciseness styles in the prompt"
    );
    assert!(prompt.contains("Keep the answer"));
}

#[test]
fn custom_template_is_respected() {
    let prompt = build_prompt(&PromptInputs {
        template: "Speak for {person}.\nContext: {context}\nQ: {question}",
        person: "Ada",
        question: "what now",
        history: &[],
        kb_context: None,
        voice_style: VoiceStyle::Ninja,
    });
    assert!(prompt.starts_with("Speak for Ada.\n"));
    assert!(prompt.contains("Q: what now"));
    assert!(prompt.contains("way of the ninja"));
}

#[test]
fn single_line_template_appends_directives() {
    let prompt = build_prompt(&PromptInputs {
        template: "Answer as {person}: {question}",
        person: "Ada",
        question: "hello",
        history: &[],
        kb_context: None,
        voice_style: VoiceStyle::Normal,
    });
    assert!(prompt.starts_with("Answer as Ada: hello"));
    assert!(prompt.contains("Keep the answer"));
}

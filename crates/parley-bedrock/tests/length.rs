use parley_bedrock::length::response_length;

const MAX: u32 = 500;

#[test]
fn bare_greetings_get_the_short_budget() {
    for greeting in ["hi", "Hello", "  hey  ", "thanks", "thank you", "OK", "yep"] {
        assert_eq!(response_length(greeting, MAX), 100, "greeting: {greeting}");
    }
}

#[test]
fn greeting_words_inside_questions_do_not_count() {
    // "hi" appears as a substring but the message is a real question.
    assert_ne!(response_length("hi, what is your background", MAX), 100);
}

#[test]
fn attribute_questions_get_the_long_budget() {
    assert_eq!(response_length("list your skills", 1000), 700);
    assert_eq!(response_length("do you hold any certifications", 1000), 700);
    assert_eq!(response_length("where did you go to school", 1000), 700);
}

#[test]
fn wh_questions_get_the_medium_budget() {
    assert_eq!(response_length("what do you do", 1000), 600);
    assert_eq!(response_length("how do you lead teams", 1000), 600);
}

#[test]
fn background_questions_get_the_long_budget() {
    assert_eq!(response_length("tell me about yourself", 1000), 700);
    assert_eq!(response_length("give me your story", 1000), 700);
}

#[test]
fn other_questions_get_the_default_budget() {
    assert_eq!(response_length("describe a project you are proud of", 1000), 500);
}

#[test]
fn every_budget_is_capped_by_max_tokens() {
    assert_eq!(response_length("list your skills", 200), 200);
    assert_eq!(response_length("what do you do", 200), 200);
    assert_eq!(response_length("hi", 50), 50);
    assert_eq!(response_length("anything else", 200), 200);
}

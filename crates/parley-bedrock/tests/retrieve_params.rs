use parley_bedrock::retrieve::number_of_results;

#[test]
fn background_questions_pull_three_passages() {
    assert_eq!(number_of_results("tell me about yourself"), 3);
    assert_eq!(number_of_results("what is your career history"), 3);
    assert_eq!(number_of_results("give me an overview"), 3);
}

#[test]
fn specific_questions_pull_two_passages() {
    assert_eq!(number_of_results("what are your certifications"), 2);
    assert_eq!(number_of_results("list your skills"), 2);
    assert_eq!(number_of_results("show me your education"), 2);
}

#[test]
fn general_questions_pull_two_passages() {
    assert_eq!(number_of_results("do you enjoy mentoring"), 2);
}

use super::*;

#[test]
fn new_is_empty() {
    let t = Transcript::new();
    assert!(t.is_empty());
    assert!(t.last().is_none());
}

#[test]
fn with_greeting_starts_with_assistant_turn() {
    let t = Transcript::with_greeting();
    assert_eq!(t.all(), &[Turn::assistant(GREETING)]);
}

#[test]
fn append_preserves_order_and_duplicates() {
    let mut t = Transcript::new();
    t.append(Turn::user("hi"));
    t.append(Turn::assistant("hey"));
    t.append(Turn::user("hi"));
    assert_eq!(t.len(), 3);
    assert_eq!(t.all()[0], Turn::user("hi"));
    assert_eq!(t.all()[1].speaker, Speaker::Assistant);
    assert_eq!(t.last(), Some(&Turn::user("hi")));
}

#[test]
fn turn_serializes_lowercase_speaker() {
    let json = serde_json::to_value(Turn::assistant("hey")).unwrap();
    assert_eq!(json, serde_json::json!({ "speaker": "assistant", "text": "hey" }));
}

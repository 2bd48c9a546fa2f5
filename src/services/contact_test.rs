use super::*;

fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
    ContactForm { name: name.into(), email: email.into(), subject: subject.into(), message: message.into() }
}

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  Visitor@Example.com "), Some("visitor@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("visitor"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("visitor@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
    assert_eq!(normalize_email("a b@example.com"), None);
}

#[test]
fn validate_trims_fields() {
    let msg = form(" Ada ", "ADA@example.com", " Hello ", " Let's talk \n").validate().unwrap();
    assert_eq!(
        msg,
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Let's talk".into(),
        }
    );
}

#[test]
fn validate_reports_missing_field() {
    assert_eq!(form("", "a@b.c", "s", "m").validate(), Err(ContactError::MissingField("name")));
    assert_eq!(form("n", "a@b.c", "  ", "m").validate(), Err(ContactError::MissingField("subject")));
    assert_eq!(form("n", "a@b.c", "s", "").validate(), Err(ContactError::MissingField("message")));
}

#[test]
fn validate_rejects_bad_email() {
    assert_eq!(form("n", "not-an-email", "s", "m").validate(), Err(ContactError::InvalidEmail));
}

#[test]
fn validate_rejects_oversized_message() {
    let long = "x".repeat(MAX_MESSAGE_LEN + 1);
    assert_eq!(form("n", "a@b.c", "s", &long).validate(), Err(ContactError::TooLong("message")));
}

#[test]
fn form_deserializes_with_missing_fields() {
    let parsed: ContactForm = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
    assert_eq!(parsed.validate(), Err(ContactError::MissingField("email")));
}

#[test]
fn render_escapes_html_and_keeps_line_breaks() {
    let msg = form("<b>Eve</b>", "eve@example.com", "Hi & bye", "line one\nline two")
        .validate()
        .unwrap();
    let html = render_contact_email(&msg);
    assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
    assert!(html.contains("Hi &amp; bye"));
    assert!(html.contains("line one<br>line two"));
    assert!(!html.contains("<b>Eve"));
}

//! Contact form service.
//!
//! Validates a visitor's message and forwards it to the site owner through
//! the Resend email API.

use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use serde::Deserialize;
use tracing::info;

use crate::config::env_nonempty;

const MAX_FIELD_LEN: usize = 200;
const MAX_MESSAGE_LEN: usize = 5000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("field too long: {0}")]
    TooLong(&'static str),
    #[error("invalid email")]
    InvalidEmail,
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

/// Contact form as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// A form that passed validation: fields trimmed, email lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let mut parts = normalized.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    if local.is_empty() || domain.is_empty() || normalized.chars().any(char::is_whitespace) {
        return None;
    }
    Some(normalized)
}

fn required(value: &str, field: &'static str, max_len: usize) -> Result<String, ContactError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContactError::MissingField(field));
    }
    if value.chars().count() > max_len {
        return Err(ContactError::TooLong(field));
    }
    Ok(value.to_owned())
}

impl ContactForm {
    /// # Errors
    ///
    /// Returns the first failing field: missing, too long, or a malformed email.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let name = required(&self.name, "name", MAX_FIELD_LEN)?;
        let email = required(&self.email, "email", MAX_FIELD_LEN)?;
        let email = normalize_email(&email).ok_or(ContactError::InvalidEmail)?;
        let subject = required(&self.subject, "subject", MAX_FIELD_LEN)?;
        let message = required(&self.message, "message", MAX_MESSAGE_LEN)?;
        Ok(ContactMessage { name, email, subject, message })
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[must_use]
pub fn render_contact_email(msg: &ContactMessage) -> String {
    let body = escape_html(&msg.message).replace('\n', "<br>");
    format!(
        "<h2>New message from your portfolio</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Subject:</strong> {}</p>\
         <p>{}</p>",
        escape_html(&msg.name),
        escape_html(&msg.email),
        escape_html(&msg.subject),
        body,
    )
}

// =============================================================================
// MAILER
// =============================================================================

/// Resend credentials and addresses for contact delivery.
#[derive(Clone)]
pub struct ContactMailer {
    api_key: String,
    from: String,
    to: String,
}

impl ContactMailer {
    /// Read `RESEND_API_KEY`, `CONTACT_FROM`, and `CONTACT_TO`. `None` unless
    /// all three are set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: env_nonempty("RESEND_API_KEY")?,
            from: env_nonempty("CONTACT_FROM")?,
            to: env_nonempty("CONTACT_TO")?,
        })
    }

    /// # Errors
    ///
    /// Returns [`ContactError::EmailDelivery`] if Resend rejects the message.
    pub async fn send(&self, msg: &ContactMessage) -> Result<(), ContactError> {
        let resend = Resend::new(&self.api_key);
        let to = [self.to.as_str()];
        let subject = format!("[Portfolio] {}", msg.subject);
        let html = render_contact_email(msg);

        let email = CreateEmailBaseOptions::new(&self.from, to, &subject)
            .with_html(&html)
            .with_reply(&msg.email);
        resend
            .emails
            .send(email)
            .await
            .map_err(|e| ContactError::EmailDelivery(e.to_string()))?;
        info!(subject_len = msg.subject.len(), "contact: message delivered");
        Ok(())
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;

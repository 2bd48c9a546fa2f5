//! Canned-response table — fixed replies for exact trigger phrases.
//!
//! DESIGN
//! ======
//! Keys are stored normalized (trimmed, lowercased) and lookups normalize
//! the same way, so the match rule is part of the table's contract rather
//! than an accident of how keys were typed. Matching is exact equality on
//! the normalized string: no substring, punctuation, or fuzzy matching.

use std::collections::HashMap;
use std::path::Path;

/// Built-in triggers, used when no table file is configured.
const DEFAULT_RESPONSES: &[(&str, &str)] = &[
    ("hi", "Hey! I'm Abu's bot 🤖. Ask me anything about him!"),
    ("hello", "Hello there! I'm here to tell you about Abu."),
    ("projects", "Abu has worked on React, Next.js, and 3D portfolio projects."),
    ("skills", "He knows Java, Python, C, React, Tailwind CSS, and loves learning new tech."),
    ("contact", "You can reach Abu via LinkedIn or email. Check the contact section!"),
    ("gdg", "Abu is a proud student member of GDG Kolkata, actively learning and contributing."),
];

#[derive(Debug, thiserror::Error)]
pub enum CannedTableError {
    #[error("failed to read canned responses: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse canned responses: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("empty trigger phrase")]
    EmptyTrigger,
    #[error("duplicate trigger after normalization: {0:?}")]
    DuplicateTrigger(String),
}

/// Normalize user input into table-key form: surrounding whitespace trimmed,
/// case folded.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Immutable trigger → reply table, loaded once at startup.
#[derive(Debug, Clone)]
pub struct CannedResponses {
    entries: HashMap<String, String>,
}

impl CannedResponses {
    /// Build a table from `(trigger, reply)` pairs, normalizing triggers.
    ///
    /// # Errors
    ///
    /// Returns [`CannedTableError::EmptyTrigger`] for a blank trigger and
    /// [`CannedTableError::DuplicateTrigger`] when two triggers normalize to
    /// the same key.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, CannedTableError>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries = HashMap::new();
        for (trigger, reply) in pairs {
            let key = normalize(trigger.as_ref());
            if key.is_empty() {
                return Err(CannedTableError::EmptyTrigger);
            }
            if entries.contains_key(&key) {
                return Err(CannedTableError::DuplicateTrigger(key));
            }
            entries.insert(key, reply.into());
        }
        Ok(Self { entries })
    }

    /// Parse a YAML mapping of trigger → reply.
    ///
    /// # Errors
    ///
    /// Returns a parse error for anything other than a string → string
    /// mapping, plus the errors of [`CannedResponses::from_pairs`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CannedTableError> {
        // "Hi" and "hi" are distinct YAML keys; from_pairs rejects the collision.
        let mapping: serde_yaml::Mapping = serde_yaml::from_str(yaml)?;
        let mut pairs = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let trigger: String = serde_yaml::from_value(key)?;
            let reply: String = serde_yaml::from_value(value)?;
            pairs.push((trigger, reply));
        }
        Self::from_pairs(pairs)
    }

    /// Read and parse a YAML table file.
    ///
    /// # Errors
    ///
    /// Returns [`CannedTableError::Io`] if the file cannot be read, plus the
    /// errors of [`CannedResponses::from_yaml_str`].
    pub fn from_yaml_file(path: &Path) -> Result<Self, CannedTableError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Look up the reply for already-normalized input.
    ///
    /// Empty input is never a hit.
    #[must_use]
    pub fn lookup(&self, normalized: &str) -> Option<&str> {
        if normalized.is_empty() {
            return None;
        }
        self.entries.get(normalized).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CannedResponses {
    fn default() -> Self {
        let entries = DEFAULT_RESPONSES
            .iter()
            .map(|(trigger, reply)| ((*trigger).to_string(), (*reply).to_string()))
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
#[path = "canned_test.rs"]
mod tests;

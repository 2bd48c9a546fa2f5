//! Process configuration parsed from environment variables.
//!
//! Every knob has a default so the site starts with an empty environment;
//! the chat widget then answers canned triggers only and the completion
//! proxy reports itself unavailable.

use std::path::PathBuf;
use std::time::Duration;

use crate::chat::session::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_SECS};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_CAROUSEL_TRANSITION_MS: u64 = 600;
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Directory of the static portfolio site served as the fallback.
    pub website_dir: PathBuf,
    /// Remote `{question}` → `{answer}` endpoint. In-process LLM when absent.
    pub completion_url: Option<String>,
    pub completion_timeout: Duration,
    /// Answer `/api/chatgpt` with 503 regardless of LLM configuration.
    pub completion_stub: bool,
    /// YAML trigger → reply table. Built-in table when absent.
    pub canned_responses_path: Option<PathBuf>,
    pub carousel_interval: Duration,
    pub carousel_transition: Duration,
    /// Chat sessions untouched this long are discarded.
    pub chat_session_idle: Duration,
    /// Open chat sessions allowed at once.
    pub chat_max_sessions: usize,
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` is set but not a port
    /// number, or the carousel interval, session idle timeout, or session
    /// limit is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let carousel_interval_ms = env_parse("CAROUSEL_INTERVAL_MS", DEFAULT_CAROUSEL_INTERVAL_MS);
        if carousel_interval_ms == 0 {
            return Err(ConfigError::Invalid { key: "CAROUSEL_INTERVAL_MS", value: "0".into() });
        }

        let chat_session_idle_secs = env_parse("CHAT_SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS);
        if chat_session_idle_secs == 0 {
            return Err(ConfigError::Invalid { key: "CHAT_SESSION_IDLE_SECS", value: "0".into() });
        }
        let chat_max_sessions = env_parse("CHAT_MAX_SESSIONS", DEFAULT_MAX_SESSIONS);
        if chat_max_sessions == 0 {
            return Err(ConfigError::Invalid { key: "CHAT_MAX_SESSIONS", value: "0".into() });
        }

        Ok(Self {
            port,
            website_dir: env_nonempty("WEBSITE_DIR").map_or_else(|| PathBuf::from("website"), PathBuf::from),
            completion_url: env_nonempty("COMPLETION_URL"),
            completion_timeout: Duration::from_secs(env_parse(
                "COMPLETION_TIMEOUT_SECS",
                DEFAULT_COMPLETION_TIMEOUT_SECS,
            )),
            completion_stub: env_bool("COMPLETION_STUB").unwrap_or(false),
            canned_responses_path: env_nonempty("CANNED_RESPONSES_PATH").map(PathBuf::from),
            carousel_interval: Duration::from_millis(carousel_interval_ms),
            carousel_transition: Duration::from_millis(env_parse(
                "CAROUSEL_TRANSITION_MS",
                DEFAULT_CAROUSEL_TRANSITION_MS,
            )),
            chat_session_idle: Duration::from_secs(chat_session_idle_secs),
            chat_max_sessions,
        })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

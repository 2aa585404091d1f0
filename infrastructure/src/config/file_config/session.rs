//! Session configuration from TOML (`[session]` section)

use crate::config::issue::ConfigIssue;
use chatline_application::SessionConfig;
use chatline_application::config::session_config::{DEFAULT_FALLBACK_REPLY, DEFAULT_GREETING};
use chatline_domain::DEFAULT_MAX_CHARS;
use serde::{Deserialize, Serialize};

/// Raw session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Maximum characters per message
    pub max_chars: usize,
    /// Opening assistant line when the backend has none
    pub greeting: String,
    /// Reply used when a successful response carries no text
    pub fallback_reply: String,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            greeting: DEFAULT_GREETING.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

impl FileSessionConfig {
    /// Convert to the application's [`SessionConfig`].
    ///
    /// A zero limit would reject every message, so it falls back to the default.
    pub fn to_session_config(&self) -> (SessionConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let max_chars = if self.max_chars == 0 {
            issues.push(ConfigIssue::out_of_range(
                "session.max_chars",
                0,
                &format!("using {}", DEFAULT_MAX_CHARS),
            ));
            DEFAULT_MAX_CHARS
        } else {
            self.max_chars
        };

        let mut config = SessionConfig::default()
            .with_max_chars(max_chars)
            .with_greeting(self.greeting.clone());
        config.fallback_reply = if self.fallback_reply.trim().is_empty() {
            DEFAULT_FALLBACK_REPLY.to_string()
        } else {
            self.fallback_reply.clone()
        };
        (config, issues)
    }
}

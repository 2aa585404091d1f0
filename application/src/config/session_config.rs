//! Session behavior configuration.

use chatline_domain::{DEFAULT_MAX_CHARS, InputPolicy};
use serde::{Deserialize, Serialize};

/// Greeting shown when the backend does not supply one
pub const DEFAULT_GREETING: &str = "Hi! Ask me anything.";

/// Reply used when a successful response carries no usable reply text
pub const DEFAULT_FALLBACK_REPLY: &str = "Sorry, I couldn't get a response.";

/// Controls how a [`SessionController`](crate::SessionController) behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum characters per message.
    pub max_chars: usize,
    /// Static greeting shown at session start.
    pub greeting: String,
    /// Reply text substituted for a missing or undecodable reply.
    pub fallback_reply: String,
}

impl SessionConfig {
    pub fn input_policy(&self) -> InputPolicy {
        InputPolicy::new(self.max_chars)
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            greeting: DEFAULT_GREETING.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

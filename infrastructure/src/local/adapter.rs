//! [`LocalReplyAdapter`]: in-process canned replies.

use async_trait::async_trait;
use chatline_application::{AdapterError, BackendAdapter};
use chatline_domain::Turn;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::debug;

/// Pause before each reply
pub const DEFAULT_LOCAL_DELAY_MS: u64 = 700;

/// Reply for messages with no table entry
pub const DEFAULT_UNKNOWN_REPLY: &str = "I'm sorry, I don't understand that.";

/// Built-in reply table, keyed by lowercase message.
pub fn default_replies() -> BTreeMap<String, String> {
    [
        ("hello", "Hello! How can I assist you?"),
        ("hi", "Hi there! How can I help you?"),
        ("bye", "Goodbye!"),
        ("how are you", "I'm a bot, but I'm doing great! How about you?"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Settings for [`LocalReplyAdapter`]
#[derive(Debug, Clone)]
pub struct LocalReplyConfig {
    pub delay: Duration,
    pub unknown_reply: String,
    pub replies: BTreeMap<String, String>,
}

impl Default for LocalReplyConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_LOCAL_DELAY_MS),
            unknown_reply: DEFAULT_UNKNOWN_REPLY.to_string(),
            replies: default_replies(),
        }
    }
}

/// Looks the message up in a reply table. Never fails.
///
/// Matching is on the whole message, trimmed and case-insensitive.
pub struct LocalReplyAdapter {
    replies: HashMap<String, String>,
    unknown_reply: String,
    delay: Duration,
}

impl LocalReplyAdapter {
    pub fn new(config: LocalReplyConfig) -> Self {
        let replies = config
            .replies
            .into_iter()
            .map(|(k, v)| (normalize(&k), v))
            .collect();
        Self {
            replies,
            unknown_reply: config.unknown_reply,
            delay: config.delay,
        }
    }

    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// The reply for `message`, without the delay.
    pub fn lookup(&self, message: &str) -> &str {
        self.replies
            .get(&normalize(message))
            .map(String::as_str)
            .unwrap_or(&self.unknown_reply)
    }
}

fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

#[async_trait]
impl BackendAdapter for LocalReplyAdapter {
    fn name(&self) -> &str {
        "local"
    }

    async fn send_turn(&self, user_text: &str, history: &[Turn]) -> Result<String, AdapterError> {
        debug!("Local reply for turn {}", history.len() + 1);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.lookup(user_text).to_string())
    }
}

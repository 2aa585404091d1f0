//! Wire types for the direct reply endpoint.
//!
//! ```text
//! POST /api/chat   {"message": "...", "history": [{"role": "user", "content": "..."}]}
//! 200              {"reply": "..."}
//! 4xx/5xx          {"error": "..."}   or   {"error": {"message": "..."}}
//! ```

use chatline_domain::Turn;
use serde::{Deserialize, Serialize};

/// Request body
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub history: &'a [Turn],
}

/// Success body. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
}

/// Failure body
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail, whether `error` is a string or an object with `message`.
    pub fn detail(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub ok: bool,
    /// Upstream model the backend forwards to
    #[serde(default)]
    pub model: Option<String>,
    /// Redacted key prefix, empty when no key is configured
    #[serde(default)]
    pub key: Option<String>,
}

//! Mapping from adapter failures to user-facing messages.
//!
//! Every failed turn becomes exactly one assistant entry in the transcript.
//! The text of that entry is fixed per failure kind; backend-supplied detail
//! only goes to the logs.

use crate::ports::backend_adapter::AdapterError;
use chatline_domain::FailureCategory;

/// Fixed human-readable texts, one per failure kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureMessages {
    pub auth: String,
    pub quota: String,
    pub bad_request: String,
    pub server: String,
    pub timeout: String,
    pub unavailable: String,
    pub connection: String,
    pub unknown: String,
}

impl FailureMessages {
    /// Message for a categorized transport failure
    pub fn for_category(&self, category: FailureCategory) -> &str {
        match category {
            FailureCategory::Auth => &self.auth,
            FailureCategory::Quota => &self.quota,
            FailureCategory::BadRequest => &self.bad_request,
            FailureCategory::Server => &self.server,
            FailureCategory::Timeout => &self.timeout,
            FailureCategory::Unavailable => &self.unavailable,
        }
    }

    /// Message shown in the transcript for `error`
    pub fn for_error(&self, error: &AdapterError) -> &str {
        match error {
            AdapterError::Connection(_) => &self.connection,
            AdapterError::Transport { category, .. } => self.for_category(*category),
            AdapterError::Unknown(_) => &self.unknown,
        }
    }
}

impl Default for FailureMessages {
    fn default() -> Self {
        Self {
            auth: "Invalid API key. Check your .env and restart the server.".to_string(),
            quota: "Billing required or quota exceeded. Use a free model or add credit."
                .to_string(),
            bad_request: "The request was rejected by the server. Please rephrase and try again."
                .to_string(),
            server: "The server ran into an error. Please try again later.".to_string(),
            timeout: "Request timeout. Please try again.".to_string(),
            unavailable: "Failed to connect to AI service.".to_string(),
            connection: "Could not connect to AI service. Please try again later.".to_string(),
            unknown: "Network error. Please try again.".to_string(),
        }
    }
}

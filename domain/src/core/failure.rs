//! Backend failure classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known categories of a non-successful backend response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Credentials missing or rejected (401, 403)
    Auth,
    /// Billing required, quota exhausted or rate limited (402, 429)
    Quota,
    /// The backend refused the request itself (400, 413, 422)
    BadRequest,
    /// The backend failed while handling the request (other 5xx)
    Server,
    /// The request or an upstream call timed out (408, 504)
    Timeout,
    /// The backend or its upstream is unreachable (502, 503)
    Unavailable,
}

impl FailureCategory {
    /// All categories, in declaration order
    pub const ALL: [FailureCategory; 6] = [
        FailureCategory::Auth,
        FailureCategory::Quota,
        FailureCategory::BadRequest,
        FailureCategory::Server,
        FailureCategory::Timeout,
        FailureCategory::Unavailable,
    ];

    /// Classify an HTTP status code.
    ///
    /// Returns `None` for successful or uncategorized statuses.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 | 403 => Some(Self::Auth),
            402 | 429 => Some(Self::Quota),
            400 | 413 | 422 => Some(Self::BadRequest),
            408 | 504 => Some(Self::Timeout),
            502 | 503 => Some(Self::Unavailable),
            500..=599 => Some(Self::Server),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Quota => "quota",
            Self::BadRequest => "bad_request",
            Self::Server => "server",
            Self::Timeout => "timeout",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Backend adapter port
//!
//! Defines the interface for talking to a remote answering service.

use async_trait::async_trait;
use chatline_domain::{FailureCategory, Turn};
use thiserror::Error;

/// Errors that can occur while exchanging a turn with a backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error ({category}){}", detail_suffix(.detail))]
    Transport {
        category: FailureCategory,
        detail: Option<String>,
    },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl AdapterError {
    pub fn transport(category: FailureCategory) -> Self {
        Self::Transport {
            category,
            detail: None,
        }
    }

    pub fn transport_with_detail(category: FailureCategory, detail: impl Into<String>) -> Self {
        Self::Transport {
            category,
            detail: Some(detail.into()),
        }
    }

    /// Failure category, if this is a categorized transport error
    pub fn category(&self) -> Option<FailureCategory> {
        match self {
            Self::Transport { category, .. } => Some(*category),
            _ => None,
        }
    }
}

/// Gateway to one chat backend protocol
///
/// Implementations (adapters) live in the infrastructure layer and are
/// chosen when the session is constructed.
///
/// Adapters must stay usable after a failed call: any half-built internal
/// state is discarded so the next call starts clean. They never retry on
/// their own.
#[async_trait]
pub trait BackendAdapter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Exchange one turn and return the reply text.
    ///
    /// `history` holds the turns before this one, oldest first; the new
    /// message is passed separately as `user_text`.
    async fn send_turn(&self, user_text: &str, history: &[Turn]) -> Result<String, AdapterError>;

    /// Greeting to show when the session starts.
    ///
    /// `None` means the session falls back to its static greeting.
    async fn greeting(&self) -> Option<String> {
        None
    }

    /// Forget backend-side conversation state when the session restarts.
    async fn reset(&self) {}
}

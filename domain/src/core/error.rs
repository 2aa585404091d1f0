//! Domain error types

use thiserror::Error;

/// Reasons a piece of user input cannot be submitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    #[error("Message is empty")]
    Empty,

    #[error("Message is too long ({len} / {max} characters)")]
    TooLong { len: usize, max: usize },
}

impl InputRejection {
    /// Check if this rejection was caused by blank input
    pub fn is_empty(&self) -> bool {
        matches!(self, InputRejection::Empty)
    }
}

//! Input policy value object

use super::error::InputRejection;
use serde::{Deserialize, Serialize};

/// Default maximum number of characters in a single message
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Decides whether raw user input may be submitted (Value Object)
///
/// Length is counted in characters, not bytes. Leading and trailing
/// whitespace is trimmed before a message is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPolicy {
    max_chars: usize,
}

impl InputPolicy {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Character count of the raw input, as shown by a counter widget.
    pub fn count(raw: &str) -> usize {
        raw.chars().count()
    }

    /// Whether the submit control should be enabled for this input.
    pub fn allows_submission(&self, raw: &str) -> bool {
        self.validate(raw).is_ok()
    }

    /// Validate raw input, returning the trimmed text to submit.
    pub fn validate<'a>(&self, raw: &'a str) -> Result<&'a str, InputRejection> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(InputRejection::Empty);
        }
        let len = Self::count(raw);
        if len > self.max_chars {
            return Err(InputRejection::TooLong {
                len,
                max: self.max_chars,
            });
        }
        Ok(text)
    }
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

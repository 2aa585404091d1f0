//! Presentation-level configuration
//!
//! Configuration for console output and REPL behavior.

use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show the waiting spinner while a reply is pending
    pub show_indicator: bool,
    /// Print the user's own messages back as transcript entries
    pub echo_user: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_indicator: true,
            echo_user: false,
        }
    }
}

impl OutputConfig {
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_indicator(mut self, show: bool) -> Self {
        self.show_indicator = show;
        self
    }

    pub fn with_echo_user(mut self, echo: bool) -> Self {
        self.echo_user = echo;
        self
    }
}

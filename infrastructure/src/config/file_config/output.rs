//! Output configuration from TOML (`[output]` section)

use crate::config::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How conversation text is rendered before display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupKind {
    /// Text as-is
    Plain,
    /// Markdown styled for the terminal
    #[default]
    Markdown,
    /// Markdown rendered to sanitized HTML
    Html,
    /// HTML-escaped text, newlines as `<br>`
    Escape,
}

impl MarkupKind {
    pub const VALID_VALUES: [&'static str; 4] = ["plain", "markdown", "html", "escape"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupKind::Plain => "plain",
            MarkupKind::Markdown => "markdown",
            MarkupKind::Html => "html",
            MarkupKind::Escape => "escape",
        }
    }
}

impl FromStr for MarkupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(MarkupKind::Plain),
            "markdown" | "md" => Ok(MarkupKind::Markdown),
            "html" => Ok(MarkupKind::Html),
            "escape" | "html-escape" => Ok(MarkupKind::Escape),
            other => Err(format!("unknown markup: {}", other)),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Markup renderer name
    pub markup: String,
    /// Print the user's own turns back after submission
    pub echo_user: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            markup: MarkupKind::default().as_str().to_string(),
            echo_user: false,
        }
    }
}

impl FileOutputConfig {
    pub fn parse_markup(&self) -> (MarkupKind, Vec<ConfigIssue>) {
        match self.markup.parse::<MarkupKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => (
                MarkupKind::default(),
                vec![ConfigIssue::invalid_enum(
                    "output.markup",
                    &self.markup,
                    &MarkupKind::VALID_VALUES,
                    MarkupKind::default().as_str(),
                )],
            ),
        }
    }
}

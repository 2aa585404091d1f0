//! Console rendering of the conversation

use crate::config::OutputConfig;
use crate::progress::indicator::WaitingIndicator;
use chatline_application::PresentationSink;
use chatline_domain::{Role, Transcript};
use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Formats transcript entries for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Speaker label for a role
    pub fn label(role: Role) -> String {
        match role {
            Role::User => "You".cyan().bold().to_string(),
            Role::Assistant => "Assistant".green().bold().to_string(),
        }
    }

    /// One entry: label, then the text with continuation lines indented.
    pub fn format_entry(role: Role, text: &str) -> String {
        let body = text.lines().collect::<Vec<_>>().join("\n  ");
        format!("{}: {}", Self::label(role), body)
    }

    /// The whole transcript, one entry per turn.
    pub fn format_transcript(transcript: &Transcript) -> String {
        if transcript.is_empty() {
            return "(no messages yet)".dimmed().to_string();
        }
        transcript
            .iter()
            .map(|turn| Self::format_entry(turn.role(), turn.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Hint shown when the input is over the character limit.
    pub fn over_limit_hint(len: usize, max: usize) -> String {
        format!(
            "{} {}",
            format!("{}/{}", len, max).red().bold(),
            "characters, message not sent".dimmed()
        )
    }
}

/// [`PresentationSink`] that prints to the terminal.
pub struct ConsoleSink {
    echo_user: bool,
    indicator: WaitingIndicator,
    input_enabled: AtomicBool,
}

impl ConsoleSink {
    pub fn new(config: &OutputConfig) -> Self {
        if !config.color {
            colored::control::set_override(false);
        }
        Self {
            echo_user: config.echo_user,
            indicator: WaitingIndicator::new(config.show_indicator),
            input_enabled: AtomicBool::new(false),
        }
    }

    /// Whether the controller currently accepts submissions.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled.load(Ordering::SeqCst)
    }
}

impl PresentationSink for ConsoleSink {
    fn append_entry(&self, role: Role, text: &str) {
        if role == Role::User && !self.echo_user {
            return;
        }
        // Clear the spinner line before printing over it
        self.indicator.hide();
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", ConsoleFormatter::format_entry(role, text));
        let _ = stdout.flush();
    }

    fn set_indicator_visible(&self, visible: bool) {
        if visible {
            self.indicator.show();
        } else {
            self.indicator.hide();
        }
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.input_enabled.store(enabled, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatline_domain::Turn;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_entry_indents_continuation_lines() {
        plain();
        assert_eq!(
            ConsoleFormatter::format_entry(Role::Assistant, "one\ntwo"),
            "Assistant: one\n  two"
        );
    }

    #[test]
    fn test_format_transcript() {
        plain();
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("hello"));
        transcript.append(Turn::assistant("Hi there"));
        assert_eq!(
            ConsoleFormatter::format_transcript(&transcript),
            "You: hello\nAssistant: Hi there"
        );
    }

    #[test]
    fn test_over_limit_hint() {
        plain();
        assert_eq!(
            ConsoleFormatter::over_limit_hint(2001, 2000),
            "2001/2000 characters, message not sent"
        );
    }

    #[test]
    fn test_echo_user_setting_is_kept() {
        let quiet = ConsoleSink::new(&OutputConfig::default().with_indicator(false));
        assert!(!quiet.echo_user);
        let echoing = ConsoleSink::new(
            &OutputConfig::default()
                .with_indicator(false)
                .with_echo_user(true),
        );
        assert!(echoing.echo_user);
    }

    #[test]
    fn test_sink_tracks_input_state() {
        let sink = ConsoleSink::new(&OutputConfig::default().with_indicator(false));
        assert!(!sink.input_enabled());
        sink.set_input_enabled(true);
        assert!(sink.input_enabled());
        sink.set_indicator_visible(true);
        sink.set_indicator_visible(false);
    }
}

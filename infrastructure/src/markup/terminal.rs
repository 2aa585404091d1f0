//! Markdown for the terminal.

use chatline_application::MarkupRenderer;
use termimad::MadSkin;

/// Renders markdown with terminal styling (bold, italics, code, lists).
///
/// Without color the skin has no styles, so only the markdown syntax is removed.
pub struct TerminalMarkdownRenderer {
    skin: MadSkin,
}

impl TerminalMarkdownRenderer {
    pub fn new(color: bool) -> Self {
        let skin = if color {
            let mut skin = MadSkin::default_dark();
            skin.inline_code
                .set_fg(termimad::crossterm::style::Color::Yellow);
            skin
        } else {
            MadSkin::no_style()
        };
        Self { skin }
    }
}

impl MarkupRenderer for TerminalMarkdownRenderer {
    fn render(&self, text: &str) -> String {
        self.skin.term_text(text).to_string().trim_end().to_string()
    }
}

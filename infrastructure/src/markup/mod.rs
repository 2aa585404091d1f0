//! Markup renderers for conversation text.
//!
//! - [`TerminalMarkdownRenderer`] — markdown styled for the terminal
//! - [`MarkdownHtmlRenderer`] — markdown to sanitized HTML
//! - [`HtmlEscapeRenderer`] — escape-only HTML fallback

mod escape;
mod html;
mod terminal;

pub use escape::HtmlEscapeRenderer;
pub use html::MarkdownHtmlRenderer;
pub use terminal::TerminalMarkdownRenderer;

use crate::config::MarkupKind;
use chatline_application::{MarkupRenderer, PlainTextRenderer};
use std::sync::Arc;

/// Renderer for the configured markup kind.
///
/// `color` only affects the terminal renderer.
pub fn renderer_for(kind: MarkupKind, color: bool) -> Arc<dyn MarkupRenderer> {
    match kind {
        MarkupKind::Plain => Arc::new(PlainTextRenderer),
        MarkupKind::Markdown => Arc::new(TerminalMarkdownRenderer::new(color)),
        MarkupKind::Html => Arc::new(MarkdownHtmlRenderer),
        MarkupKind::Escape => Arc::new(HtmlEscapeRenderer),
    }
}

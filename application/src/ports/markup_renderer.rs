//! Port for turning message text into display markup.

/// Pure text → display markup conversion.
///
/// HTML-producing implementations must return markup that is safe to
/// insert as-is.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, text: &str) -> String;
}

/// Renders text unchanged, for terminals.
pub struct PlainTextRenderer;

impl MarkupRenderer for PlainTextRenderer {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

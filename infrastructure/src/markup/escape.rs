//! Escape-only HTML rendering.

use chatline_application::MarkupRenderer;

/// Renders text for an HTML surface without interpreting markdown:
/// escapes markup-significant characters and turns newlines into `<br>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscapeRenderer;

impl MarkupRenderer for HtmlEscapeRenderer {
    fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                '\n' => out.push_str("<br>"),
                '\r' => {}
                c => out.push(c),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_tags() {
        assert_eq!(
            HtmlEscapeRenderer.render("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_ampersand_first() {
        assert_eq!(HtmlEscapeRenderer.render("a &lt; b"), "a &amp;lt; b");
    }

    #[test]
    fn test_newlines() {
        assert_eq!(HtmlEscapeRenderer.render("one\r\ntwo\nthree"), "one<br>two<br>three");
    }
}

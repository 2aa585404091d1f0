//! Markdown to sanitized HTML.

use chatline_application::MarkupRenderer;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// URL schemes a rendered link or image may point at. Relative URLs are kept.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Renders markdown (GFM tables and strikethrough, single newlines as breaks)
/// to HTML that is safe to insert into a page.
///
/// Raw HTML in the source is shown as text and links with other schemes
/// (`javascript:`, `data:`) are replaced by `#`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownHtmlRenderer;

impl MarkdownHtmlRenderer {
    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options
    }
}

impl MarkupRenderer for MarkdownHtmlRenderer {
    fn render(&self, text: &str) -> String {
        let events = Parser::new_ext(text, Self::options()).map(sanitize);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, events);
        out.trim_end().to_string()
    }
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::SoftBreak => Event::HardBreak,
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let trimmed = url.trim();
    let scheme_end = trimmed.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(i) if trimmed[i..].starts_with(':') => {
            let scheme = trimmed[..i].to_ascii_lowercase();
            if SAFE_SCHEMES.contains(&scheme.as_str()) {
                url
            } else {
                CowStr::from("#")
            }
        }
        _ => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        MarkdownHtmlRenderer.render(text)
    }

    #[test]
    fn test_emphasis_and_code() {
        assert_eq!(
            render("**bold** and `code`"),
            "<p><strong>bold</strong> and <code>code</code></p>"
        );
    }

    #[test]
    fn test_single_newline_is_break() {
        let html = render("line one\nline two");
        assert!(html.contains("line one<br />"), "{html}");
    }

    #[test]
    fn test_strikethrough_and_table() {
        assert!(render("~~gone~~").contains("<del>gone</del>"));
        let table = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(table.contains("<table>"), "{table}");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render("<script>alert(1)</script>");
        assert!(!html.contains("<script"), "{html}");
        assert!(html.contains("&lt;script&gt;"), "{html}");

        let inline = render("hi <img src=x onerror=alert(1)> there");
        assert!(!inline.contains("<img"), "{inline}");
    }

    #[test]
    fn test_unsafe_link_schemes_are_neutralized() {
        let html = render("[click](javascript:alert(1))");
        assert!(html.contains(r##"href="#""##), "{html}");
        assert!(!html.contains("javascript"), "{html}");

        let html = render("[docs](https://example.com/a) [rel](/path)");
        assert!(html.contains(r#"href="https://example.com/a""#), "{html}");
        assert!(html.contains(r#"href="/path""#), "{html}");
    }
}

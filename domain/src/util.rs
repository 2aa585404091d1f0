//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for log lines.
///
/// Newlines are folded into spaces and an ellipsis is appended when the
/// text was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let folded: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if folded.chars().count() <= max_chars {
        return folded;
    }
    let mut out: String = folded.chars().take(max_chars).collect();
    out.push('…');
    out
}

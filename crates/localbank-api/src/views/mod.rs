//! Server-side HTML rendering.
//!
//! Every function here is pure: it takes already-loaded data and returns
//! markup. Handlers in [`crate::routes`] decide what to load.

pub mod admin;
pub mod layout;
pub mod public;

/// Escape text for safe inclusion in HTML element content and
/// double-quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A CSS color value, or `inherit` when the value could break out of the
/// style context.
pub fn css_color(value: &str) -> &str {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' '));
    if safe { value } else { "inherit" }
}

/// Format a timestamp the way the pages show dates (`YYYY. M. D.`).
pub fn format_date(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y. %-m. %-d.").to_string()
}

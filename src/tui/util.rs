//! TUI utility functions.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns needed to display `s`.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `max_width` columns.
pub(crate) fn truncate_to_display_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Sanitize text for a single terminal row.
/// - Converts tabs to 4 spaces (consistent width)
/// - Turns newlines into spaces
/// - Strips other control characters, escape sequences included
pub(crate) fn sanitize_for_display(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' => result.push_str("    "),
            '\n' => result.push(' '),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }
    result
}

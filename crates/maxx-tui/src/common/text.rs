//! Text utilities for TUI rendering.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` (unicode-aware).
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let next_width = width + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width = next_width;
    }
    truncated.push('…');
    truncated
}

/// Sanitizes pasted or external text before it enters the composer.
///
/// Strips ANSI escapes, normalizes CRLF/CR line endings to `\n` and expands
/// tabs to four spaces, since `unicode_width` gives tabs zero width while
/// terminals do not.
///
/// Borrowed if nothing needed changing.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if s.contains(['\x1b', '\t', '\r']) {
        Cow::Owned(
            s.replace('\x1b', "")
                .replace("\r\n", "\n")
                .replace('\r', "\n")
                .replace('\t', "    "),
        )
    } else {
        Cow::Borrowed(s)
    }
}

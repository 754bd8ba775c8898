//! Fixed-width line wrapping.
//!
//! Width is counted in Unicode scalar values. Glyph metrics are never
//! consulted; the single monospaced face makes character count a stand-in
//! for rendered width.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Split `text` into display lines of at most `width` characters.
///
/// Every line break in the input is a line boundary, empty lines are kept
/// as empty strings, and long lines are cut into consecutive segments. A
/// trailing newline does not produce an extra line. `width` must be non-zero.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    debug_assert!(width > 0);
    let mut lines = Vec::new();

    for raw in text.lines() {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }

        let chars: Vec<char> = raw.chars().collect();
        for segment in chars.chunks(width) {
            lines.push(segment.iter().collect());
        }
    }

    lines
}

/// NFC-normalize `text` when requested, borrowing when there is nothing to do.
pub fn normalize(text: &str, enabled: bool) -> Cow<'_, str> {
    if enabled {
        Cow::Owned(text.nfc().collect())
    } else {
        Cow::Borrowed(text)
    }
}

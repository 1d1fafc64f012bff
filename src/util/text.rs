//! Utility functions for text handling

use std::borrow::Cow;

/// Collapse `\r\n` and lone `\r` into `\n`.
///
/// Borrows the input when it contains no carriage returns.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Number of `char`s in a string
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Case-folding comparison of two characters.
///
/// Compares the full lowercase expansions so that characters whose lowercase
/// form is more than one char (e.g. `İ`) still compare consistently.
pub fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Keep a prefix of at most `max_chars` characters.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_crlf() {
        assert_eq!(normalize_line_endings("a\r\nb\r\nc"), "a\nb\nc");
    }

    #[test]
    fn test_normalize_lone_cr() {
        assert_eq!(normalize_line_endings("a\rb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_normalize_mixed() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\nd\r"), "a\nb\nc\nd\n");
    }

    #[test]
    fn test_normalize_cr_before_crlf() {
        // "\r\r\n" is a lone CR followed by a CRLF: two line breaks
        assert_eq!(normalize_line_endings("a\r\r\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_borrows_clean_text() {
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_chars_eq_ignore_case() {
        assert!(chars_eq_ignore_case('a', 'A'));
        assert!(chars_eq_ignore_case('Ä', 'ä'));
        assert!(!chars_eq_ignore_case('a', 'b'));
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("hello", 3), "hel");
        assert_eq!(char_prefix("hi", 5), "hi");
        assert_eq!(char_prefix("日本語テキスト", 2), "日本");
        assert_eq!(char_prefix("abc", 0), "");
    }
}

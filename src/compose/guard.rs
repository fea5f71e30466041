//! Input length guard
//!
//! Length is counted in Unicode scalar values. Text past the limit is cut at
//! the character boundary, never mid-codepoint.

/// Maximum number of characters in a post
pub const MAX_POST_CHARS: usize = 280;

/// Clamp `text` to [`MAX_POST_CHARS`], returning the text to display and the
/// progress value to show.
///
/// The progress value is always `min(len(text), MAX_POST_CHARS)`.
pub fn on_text_changed(text: &str) -> (&str, usize) {
    match text.char_indices().nth(MAX_POST_CHARS) {
        Some((cut, _)) => (&text[..cut], MAX_POST_CHARS),
        None => (text, text.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(on_text_changed(""), ("", 0));
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(on_text_changed("Hello"), ("Hello", 5));
    }

    #[test]
    fn test_exact_limit_accepted() {
        let text = "a".repeat(280);
        let (display, progress) = on_text_changed(&text);
        assert_eq!(display, text);
        assert_eq!(progress, 280);
    }

    #[test]
    fn test_one_over_limit_truncated() {
        let text = "a".repeat(281);
        let (display, progress) = on_text_changed(&text);
        assert_eq!(display.chars().count(), 280);
        assert_eq!(progress, 280);
    }

    #[test]
    fn test_long_text_keeps_prefix() {
        let text: String = ('a'..='z').cycle().take(300).collect();
        let (display, progress) = on_text_changed(&text);
        let expected: String = text.chars().take(280).collect();
        assert_eq!(display, expected);
        assert_eq!(progress, 280);
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let text = "b".repeat(300);
        let (once, p1) = on_text_changed(&text);
        let (twice, p2) = on_text_changed(once);
        assert_eq!(once, twice);
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_multibyte_counts_characters() {
        let text = "é".repeat(280);
        assert_eq!(on_text_changed(&text), (text.as_str(), 280));

        let over = format!("{text}🐦");
        let (display, progress) = on_text_changed(&over);
        assert_eq!(display, text);
        assert_eq!(progress, 280);
    }
}

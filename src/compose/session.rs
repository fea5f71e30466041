//! Editable draft owned by the composer session

use super::guard;

/// Draft text plus the progress value derived from it.
///
/// Every edit runs the length guard, so the buffer never holds more than
/// [`guard::MAX_POST_CHARS`] characters. The cursor is a character index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftSession {
    text: String,
    cursor: usize,
    progress: usize,
}

impl DraftSession {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current progress value (`0..=MAX_POST_CHARS`)
    pub const fn progress(&self) -> usize {
        self.progress
    }

    /// Cursor position as a character index
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether there is nothing worth posting
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Re-run the length guard against the buffer.
    ///
    /// Overflow is dropped from the buffer itself, not only from the value
    /// returned, so further typing cannot accumulate hidden characters.
    pub fn on_text_changed(&mut self) -> usize {
        let (display, progress) = guard::on_text_changed(&self.text);
        let keep = display.len();
        if keep < self.text.len() {
            tracing::debug!(
                dropped = self.text[keep..].chars().count(),
                "Draft over limit, truncating"
            );
            self.text.truncate(keep);
        }
        self.progress = progress;
        self.cursor = self.cursor.min(progress);
        progress
    }

    /// Replace the whole draft, placing the cursor at the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = usize::MAX;
        self.on_text_changed();
    }

    /// Empty the draft and reset the progress indicator
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.progress = 0;
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        self.on_text_changed();
    }

    /// Insert a string at the cursor (pasted text)
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
        self.on_text_changed();
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        self.on_text_changed();
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor >= self.progress {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        self.on_text_changed();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.progress);
    }

    /// Move to the start of the current line
    pub fn move_home(&mut self) {
        let before = self.before_cursor();
        self.cursor = before
            .rfind('\n')
            .map_or(0, |nl| before[..=nl].chars().count());
    }

    /// Move to the end of the current line
    pub fn move_end(&mut self) {
        let at = self.byte_index(self.cursor);
        let rest = &self.text[at..];
        let line_len = rest.find('\n').map_or(rest, |nl| &rest[..nl]).chars().count();
        self.cursor += line_len;
    }

    /// Text between the start of the draft and the cursor
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::MAX_POST_CHARS;

    #[test]
    fn test_typing_updates_progress() {
        let mut draft = DraftSession::new();
        for c in "Hello".chars() {
            draft.insert_char(c);
        }
        assert_eq!(draft.text(), "Hello");
        assert_eq!(draft.progress(), 5);
        assert_eq!(draft.cursor(), 5);
    }

    #[test]
    fn test_paste_over_limit_truncates_buffer() {
        let mut draft = DraftSession::new();
        draft.insert_str(&"a".repeat(300));
        assert_eq!(draft.text().chars().count(), MAX_POST_CHARS);
        assert_eq!(draft.progress(), MAX_POST_CHARS);
        assert_eq!(draft.cursor(), MAX_POST_CHARS);
    }

    #[test]
    fn test_typing_at_limit_does_not_accumulate() {
        let mut draft = DraftSession::new();
        draft.set_text("a".repeat(MAX_POST_CHARS));
        for _ in 0..10 {
            draft.insert_char('b');
        }
        assert_eq!(draft.text(), "a".repeat(MAX_POST_CHARS));

        draft.backspace();
        assert_eq!(draft.progress(), MAX_POST_CHARS - 1);
        draft.insert_char('z');
        assert!(draft.text().ends_with('z'));
    }

    #[test]
    fn test_insert_mid_text_at_limit_drops_tail() {
        let mut draft = DraftSession::new();
        draft.set_text(format!("{}XY", "a".repeat(MAX_POST_CHARS - 2)));
        draft.move_home();
        draft.insert_char('!');
        assert_eq!(draft.progress(), MAX_POST_CHARS);
        assert!(draft.text().starts_with('!'));
        assert!(draft.text().ends_with('X'));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut draft = DraftSession::new();
        draft.set_text("héllo");
        draft.backspace();
        assert_eq!(draft.text(), "héll");
        draft.move_home();
        draft.delete();
        assert_eq!(draft.text(), "éll");
        assert_eq!(draft.progress(), 3);

        let mut empty = DraftSession::new();
        empty.backspace();
        empty.delete();
        assert_eq!(empty.progress(), 0);
    }

    #[test]
    fn test_line_navigation() {
        let mut draft = DraftSession::new();
        draft.set_text("first\nsecond");
        assert_eq!(draft.before_cursor(), "first\nsecond");
        draft.move_home();
        assert_eq!(draft.cursor(), 6);
        assert_eq!(draft.before_cursor(), "first\n");
        draft.move_left();
        assert_eq!(draft.before_cursor(), "first");
        draft.move_home();
        draft.move_end();
        assert_eq!(draft.cursor(), 5);
    }

    #[test]
    fn test_clear_resets_progress() {
        let mut draft = DraftSession::new();
        draft.set_text("Testing");
        draft.clear();
        assert_eq!(draft.text(), "");
        assert_eq!(draft.progress(), 0);
        assert_eq!(draft.cursor(), 0);
    }

    #[test]
    fn test_blank_detection() {
        let mut draft = DraftSession::new();
        assert!(draft.is_blank());
        draft.set_text("  \n\t ");
        assert!(draft.is_blank());
        draft.set_text(" hi ");
        assert!(!draft.is_blank());
    }
}

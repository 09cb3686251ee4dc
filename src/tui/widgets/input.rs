/// Single-line text input with a char-indexed cursor.
/// The habit form only needs short fields, so there is no scrolling,
/// selection, or undo here.
#[derive(Debug, Clone, Default)]
pub struct Input {
    value: String,
    cursor: usize, // position in chars, 0..=len
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(value: String) -> Self {
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (Backspace)
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.value.remove(offset);
        self.cursor -= 1;
    }

    /// Delete the character under the cursor (Delete)
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let offset = self.byte_offset(self.cursor);
        self.value.remove(offset);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_at_cursor() {
        let mut input = Input::new();
        for c in "water".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value(), "water");

        input.move_cursor_home();
        input.insert_char('~');
        assert_eq!(input.value(), "~water");

        input.move_cursor_right();
        input.delete_char();
        assert_eq!(input.value(), "water");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_cursor_handles_multibyte_chars() {
        let mut input = Input::from_string("héllo".to_string());
        input.move_cursor_home();
        input.move_cursor_right();
        input.move_cursor_right();
        input.delete_char(); // removes é
        assert_eq!(input.value(), "hllo");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut input = Input::from_string("ab".to_string());
        input.delete_forward();
        assert_eq!(input.value(), "ab");
    }
}

//! Single-line text editing for the search and jump fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key did to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Changed,
    /// Only the cursor moved.
    Moved,
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    /// Cursor position in chars.
    cursor: usize,
    /// Accept only ASCII digits.
    numeric: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numeric() -> Self {
        Self {
            numeric: true,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text, placing the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.set(String::new());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Edit {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if plain => {
                if self.numeric && !c.is_ascii_digit() && !(c == '-' && self.cursor == 0) {
                    return Edit::Ignored;
                }
                let at = self.byte_index(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                Edit::Changed
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let at = self.byte_index(self.cursor - 1);
                self.text.remove(at);
                self.cursor -= 1;
                Edit::Changed
            }
            KeyCode::Delete if self.cursor < self.len() => {
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
                Edit::Changed
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.text.is_empty() {
                    return Edit::Ignored;
                }
                self.clear();
                Edit::Changed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Edit::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                Edit::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                Edit::Moved
            }
            KeyCode::End => {
                self.cursor = self.len();
                Edit::Moved
            }
            KeyCode::Backspace | KeyCode::Delete => Edit::Moved,
            _ => Edit::Ignored,
        }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_insert_and_delete_multibyte() {
        let mut input = TextInput::new();
        type_str(&mut input, "김민수");
        assert_eq!(input.cursor(), 3);

        input.handle_key(key(KeyCode::Left));
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), Edit::Changed);
        assert_eq!(input.text(), "김수");

        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.handle_key(key(KeyCode::Delete)), Edit::Changed);
        assert_eq!(input.text(), "수");
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), Edit::Moved);
    }

    #[test]
    fn test_numeric_rejects_letters() {
        let mut input = TextInput::numeric();
        assert_eq!(input.handle_key(key(KeyCode::Char('x'))), Edit::Ignored);
        type_str(&mut input, "-12");
        assert_eq!(input.text(), "-12");
        assert_eq!(input.handle_key(key(KeyCode::Char('-'))), Edit::Ignored);
    }

    #[test]
    fn test_control_chars_are_not_text() {
        let mut input = TextInput::new();
        type_str(&mut input, "Kim");
        let ctrl_f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(ctrl_f), Edit::Ignored);

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(ctrl_u), Edit::Changed);
        assert_eq!(input.text(), "");
    }
}

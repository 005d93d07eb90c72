//! Single-line text input for the query prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key did to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Keep editing.
    Continue,
    Submit(String),
    Cancel,
}

/// Single-line input state.
#[derive(Debug, Clone, Default)]
pub struct LineInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
}

impl LineInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current text content.
    pub fn text(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let byte_idx = self.char_to_byte(self.cursor);
        self.content.insert(byte_idx, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte(self.cursor);
            let next_byte = self.char_to_byte(self.cursor + 1);
            self.content.drain(byte_idx..next_byte);
        }
    }

    /// Delete the character after the cursor.
    pub fn delete_char_after(&mut self) {
        let len = self.content.chars().count();
        if self.cursor < len {
            let byte_idx = self.char_to_byte(self.cursor);
            let next_byte = self.char_to_byte(self.cursor + 1);
            self.content.drain(byte_idx..next_byte);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let len = self.content.chars().count();
        self.cursor = (self.cursor + 1).min(len);
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    /// Apply a key event.
    pub fn handle_key(&mut self, key: &KeyEvent) -> LineEvent {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return LineEvent::Submit(self.content.clone()),
            KeyCode::Esc => return LineEvent::Cancel,
            KeyCode::Char('c' | 'd') if ctrl => return LineEvent::Cancel,
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('a') if ctrl => self.move_to_start(),
            KeyCode::Char('e') if ctrl => self.move_to_end(),
            KeyCode::Char(c) if !ctrl && !c.is_control() => self.insert_char(c),
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Delete => self.delete_char_after(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_to_start(),
            KeyCode::End => self.move_to_end(),
            _ => {}
        }
        LineEvent::Continue
    }

    /// Convert character index to byte index.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

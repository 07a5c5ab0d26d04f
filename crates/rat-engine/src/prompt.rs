//! Two-mode (insert/normal) text prompt used by every overlay input.
//!
//! The prompt owns its text buffer and caret. Key handling reports what the
//! owning overlay should do through [`PromptEvent`] instead of calling back
//! into it, so the overlay can react with full access to its own state.
//!
//! Bindings:
//! - `Enter` submits in either mode without changing the mode.
//! - insert: `Escape` switches to normal; any other key is applied to the
//!   buffer (when it edits text) and then forwarded as [`PromptEvent::Keydown`].
//! - normal: `i` back to insert, `y`/`o` caret left/right, `e`/`n` result
//!   cursor up/down, `Escape` asks to close. Every normal-mode key is consumed.

use crate::input::{KeyCode, KeyInput};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptMode {
    #[default]
    Insert,
    Normal,
}

/// What a key press asks the owning overlay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    Submit,
    Close,
    NavigateUp,
    NavigateDown,
    /// An insert-mode key, delivered after its edit has been applied.
    Keydown(KeyCode),
    /// Consumed by the prompt itself (mode switch, caret move, swallowed key).
    Handled,
}

#[derive(Debug, Clone, Default)]
pub struct Prompt {
    value: String,
    /// Caret position in characters, always within `0..=value.chars().count()`.
    cursor: usize,
    mode: PromptMode,
    /// Whole value selected; the next insertion replaces it.
    selected: bool,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
        self.selected = false;
    }

    pub fn clear(&mut self) {
        self.set_value(String::new());
    }

    /// Called when the owning overlay opens: back to insert mode with the
    /// existing text selected, caret at the end.
    pub fn focus(&mut self) {
        self.mode = PromptMode::Insert;
        self.cursor = self.len();
        self.selected = !self.value.is_empty();
    }

    pub fn handle_key(&mut self, key: KeyInput) -> PromptEvent {
        if key.code == KeyCode::Enter {
            return PromptEvent::Submit;
        }

        match self.mode {
            PromptMode::Normal => self.handle_normal(key.code),
            PromptMode::Insert => self.handle_insert(key),
        }
    }

    fn handle_normal(&mut self, code: KeyCode) -> PromptEvent {
        match code {
            KeyCode::Char('i') => {
                self.mode = PromptMode::Insert;
                PromptEvent::Handled
            }
            KeyCode::Char('y') => {
                self.move_caret(-1);
                PromptEvent::Handled
            }
            KeyCode::Char('o') => {
                self.move_caret(1);
                PromptEvent::Handled
            }
            KeyCode::Char('e') => PromptEvent::NavigateUp,
            KeyCode::Char('n') => PromptEvent::NavigateDown,
            KeyCode::Escape => PromptEvent::Close,
            _ => PromptEvent::Handled,
        }
    }

    fn handle_insert(&mut self, key: KeyInput) -> PromptEvent {
        match key.code {
            KeyCode::Escape => {
                self.mode = PromptMode::Normal;
                return PromptEvent::Handled;
            }
            KeyCode::Char(c) if !key.is_command() => self.insert_char(c),
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_caret(-1),
            KeyCode::Right => self.move_caret(1),
            KeyCode::Home => self.set_caret(0),
            KeyCode::End => self.set_caret(self.len()),
            _ => {}
        }
        PromptEvent::Keydown(key.code)
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert_char(&mut self, c: char) {
        if self.selected {
            self.value.clear();
            self.cursor = 0;
            self.selected = false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn delete_backward(&mut self) {
        if self.selected {
            self.clear();
            return;
        }
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    fn delete_forward(&mut self) {
        if self.selected {
            self.clear();
            return;
        }
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
    }

    fn move_caret(&mut self, delta: isize) {
        let target = self.cursor.saturating_add_signed(delta);
        self.set_caret(target);
    }

    fn set_caret(&mut self, pos: usize) {
        self.selected = false;
        self.cursor = pos.min(self.len());
    }
}

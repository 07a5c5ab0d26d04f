//! Terminal-agnostic key input.
//!
//! The CLI maps crossterm events onto these types so the state machines in
//! this crate can be driven (and tested) without a terminal.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
    BackTab,
    PageUp,
    PageDown,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    /// Cmd on macOS, Super elsewhere.
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        meta: false,
        alt: false,
    };

    /// Ctrl or Cmd, which the global shortcuts treat alike.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    pub fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(
            KeyCode::Char(c),
            Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        )
    }

    /// Parse a key name such as `"Escape"`, `"Enter"`, `"ArrowUp"` or a single
    /// character. Unrecognised names map to [`KeyCode::Other`].
    pub fn from_name(name: &str) -> Self {
        let code = match name {
            "Enter" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Escape,
            "Backspace" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            "ArrowLeft" | "Left" => KeyCode::Left,
            "ArrowRight" | "Right" => KeyCode::Right,
            "ArrowUp" | "Up" => KeyCode::Up,
            "ArrowDown" | "Down" => KeyCode::Down,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "Tab" => KeyCode::Tab,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => KeyCode::Other,
                }
            }
        };
        Self::plain(code)
    }

    /// True when the key carries a command modifier and so never counts as
    /// text input.
    pub fn is_command(&self) -> bool {
        self.modifiers.command() || self.modifiers.alt
    }
}

/// Application-wide keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd+K
    CommandPalette,
    /// Ctrl/Cmd+Shift+K, or Ctrl+N where the terminal cannot tell
    /// Ctrl+Shift+K from Ctrl+K
    NewNode,
    /// Ctrl+D
    DeleteNode,
    /// Ctrl+C
    Quit,
}

impl Shortcut {
    pub fn from_key(key: &KeyInput) -> Option<Shortcut> {
        if !key.modifiers.command() {
            return None;
        }

        match key.code {
            // Terminals report Ctrl+Shift+K either as an upper-case K or as a
            // lower-case k with the shift flag, depending on the protocol.
            KeyCode::Char('K') => Some(Shortcut::NewNode),
            KeyCode::Char('k') if key.modifiers.shift => Some(Shortcut::NewNode),
            KeyCode::Char('k') => Some(Shortcut::CommandPalette),
            KeyCode::Char('n') if key.modifiers.ctrl => Some(Shortcut::NewNode),
            KeyCode::Char('d') if key.modifiers.ctrl => Some(Shortcut::DeleteNode),
            KeyCode::Char('c') if key.modifiers.ctrl => Some(Shortcut::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_resolution() {
        assert_eq!(
            Shortcut::from_key(&KeyInput::ctrl('k')),
            Some(Shortcut::CommandPalette)
        );
        assert_eq!(
            Shortcut::from_key(&KeyInput::ctrl('K')),
            Some(Shortcut::NewNode)
        );

        let cmd_shift_k = KeyInput::new(
            KeyCode::Char('k'),
            Modifiers {
                meta: true,
                shift: true,
                ..Modifiers::NONE
            },
        );
        assert_eq!(Shortcut::from_key(&cmd_shift_k), Some(Shortcut::NewNode));

        assert_eq!(Shortcut::from_key(&KeyInput::char('k')), None);
        assert_eq!(Shortcut::from_key(&KeyInput::char('n')), None);
        assert_eq!(Shortcut::from_key(&KeyInput::ctrl('c')), Some(Shortcut::Quit));
    }

    #[test]
    fn test_legacy_ctrl_shift_k_needs_fallback() {
        // Without keyboard enhancement, Ctrl+Shift+K arrives as plain Ctrl+K.
        assert_eq!(
            Shortcut::from_key(&KeyInput::ctrl('k')),
            Some(Shortcut::CommandPalette)
        );
        assert_eq!(
            Shortcut::from_key(&KeyInput::ctrl('n')),
            Some(Shortcut::NewNode)
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(KeyInput::from_name("Escape").code, KeyCode::Escape);
        assert_eq!(KeyInput::from_name("x").code, KeyCode::Char('x'));
        assert_eq!(KeyInput::from_name("F13").code, KeyCode::Other);
    }
}

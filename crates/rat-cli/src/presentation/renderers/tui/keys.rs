//! crossterm key events -> engine key input.

use crossterm::event::{KeyCode as TermKey, KeyEvent, KeyEventKind, KeyModifiers};
use rat_engine::{KeyCode, KeyInput, Modifiers};

/// Presses and repeats only; releases are dropped.
pub fn key_input(event: &KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let code = match event.code {
        TermKey::Char(c) => KeyCode::Char(c),
        TermKey::Enter => KeyCode::Enter,
        TermKey::Esc => KeyCode::Escape,
        TermKey::Backspace => KeyCode::Backspace,
        TermKey::Delete => KeyCode::Delete,
        TermKey::Left => KeyCode::Left,
        TermKey::Right => KeyCode::Right,
        TermKey::Up => KeyCode::Up,
        TermKey::Down => KeyCode::Down,
        TermKey::Home => KeyCode::Home,
        TermKey::End => KeyCode::End,
        TermKey::Tab => KeyCode::Tab,
        TermKey::BackTab => KeyCode::BackTab,
        TermKey::PageUp => KeyCode::PageUp,
        TermKey::PageDown => KeyCode::PageDown,
        _ => KeyCode::Other,
    };

    let m = event.modifiers;
    Some(KeyInput::new(
        code,
        Modifiers {
            ctrl: m.contains(KeyModifiers::CONTROL),
            shift: m.contains(KeyModifiers::SHIFT),
            meta: m.contains(KeyModifiers::SUPER) || m.contains(KeyModifiers::META),
            alt: m.contains(KeyModifiers::ALT),
        },
    ))
}

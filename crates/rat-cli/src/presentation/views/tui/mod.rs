//! Ratatui widgets for the interactive browser.
//!
//! Each view borrows its view model and only maps it onto widgets. Selection
//! is passed in as a global target index; a view highlights whatever of its
//! own targets matches.

pub mod columns;
pub mod console;
pub mod document;
pub mod overlay;
pub mod status_bar;

pub use columns::ChildColumnsView;
pub use console::ConsoleView;
pub use document::DocumentView;
pub use overlay::OverlayView;
pub use status_bar::StatusBarView;

use crate::presentation::view_models::{StatusLevel, TextStyle};
use ratatui::style::{Color, Modifier, Style};

pub(crate) fn status_level_to_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Success => Color::Green,
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

pub(crate) fn text_style(style: TextStyle) -> Style {
    let base = Style::default();
    match style {
        TextStyle::Plain => base,
        TextStyle::Heading => base.fg(Color::Cyan).add_modifier(Modifier::BOLD),
        TextStyle::Strong => base.add_modifier(Modifier::BOLD),
        TextStyle::Emphasis => base.add_modifier(Modifier::ITALIC),
        TextStyle::Code => base.fg(Color::Yellow),
        TextStyle::Link => base.fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        TextStyle::ExternalLink => base.fg(Color::Blue),
        TextStyle::Column => base.fg(Color::Magenta).add_modifier(Modifier::BOLD),
        TextStyle::Card => base.fg(Color::Green),
        TextStyle::Muted => base.fg(Color::DarkGray),
        TextStyle::Diagnostic => base.fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        TextStyle::Error => base.fg(Color::Red),
    }
}

pub(crate) fn selected_style(style: Style) -> Style {
    style.add_modifier(Modifier::REVERSED)
}

//! UI state of the interactive browser.
//!
//! The session owns the data; `App` owns what only the terminal cares about:
//! which target is selected, how far the document is scrolled, and a card
//! picked up for a keyboard move. Every draw rebuilds the screen view model
//! and key handling works against the targets of the last one drawn.

use rat_engine::{KeyCode, KeyInput, Renderer, Shortcut};
use rat_runtime::{Completion, Session};

use crate::presentation::presenters::{Activity, present_screen};
use crate::presentation::view_models::{NavTarget, ScreenViewModel};

const PAGE: u16 = 10;

/// A card lifted off its column, waiting for a destination.
#[derive(Debug, Clone)]
struct PickedCard {
    id: String,
    name: String,
    /// `(column id, column name)` of every column on the card's board.
    columns: Vec<(String, String)>,
    column: usize,
}

pub struct App {
    session: Session,
    renderer: Renderer,
    preview_lines: usize,
    selected: usize,
    scroll: u16,
    picked: Option<PickedCard>,
    hint: Option<String>,
    shown_path: Option<String>,
    screen: Option<ScreenViewModel>,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, preview_lines: usize) -> Self {
        Self {
            session,
            renderer: Renderer::default(),
            preview_lines,
            selected: 0,
            scroll: 0,
            picked: None,
            hint: None,
            shown_path: None,
            screen: None,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn picked_card(&self) -> Option<&str> {
        self.picked.as_ref().map(|p| p.id.as_str())
    }

    pub fn apply(&mut self, completion: Completion) {
        self.session.apply(completion);
    }

    /// Rebuild the screen for `width` columns of document space.
    pub fn layout(&mut self, width: usize) -> &ScreenViewModel {
        let path = self.session.store().current_path();
        if self.shown_path.as_deref() != Some(path) {
            self.shown_path = Some(path.to_string());
            self.selected = 0;
            self.scroll = 0;
            self.picked = None;
        }

        let activity = match (&self.picked, &self.hint) {
            (Some(picked), _) => Activity::Moving {
                card: &picked.name,
                column: picked
                    .columns
                    .get(picked.column)
                    .map(|(_, name)| name.as_str())
                    .unwrap_or_default(),
            },
            (None, Some(hint)) => Activity::Hint(hint),
            (None, None) => Activity::Idle,
        };

        let screen = present_screen(
            &self.session,
            &self.renderer,
            width,
            self.preview_lines,
            self.selected,
            activity,
        );
        self.selected = screen.selected.unwrap_or(0);
        let max_scroll = u16::try_from(screen.document.lines.len()).unwrap_or(u16::MAX);
        self.scroll = self.scroll.min(max_scroll.saturating_sub(1));
        self.screen.insert(screen)
    }

    pub fn on_key(&mut self, key: KeyInput) {
        self.hint = None;

        if let Some(shortcut) = Shortcut::from_key(&key) {
            match shortcut {
                Shortcut::Quit => self.should_quit = true,
                other => {
                    self.picked = None;
                    self.session.shortcut(other);
                }
            }
            return;
        }

        if self.session.overlay_key(key) {
            return;
        }

        if self.picked.is_some() {
            self.move_key(key);
            return;
        }

        if key.is_command() {
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => self.select_by(1),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => self.select_by(-1),
            KeyCode::Enter => self.activate(),
            KeyCode::Backspace | KeyCode::Char('u') => self.session.navigate_parent(),
            KeyCode::Char('r') => self.session.reload(),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn targets(&self) -> &[NavTarget] {
        self.screen
            .as_ref()
            .map(|s| s.targets.as_slice())
            .unwrap_or_default()
    }

    fn select_by(&mut self, delta: isize) {
        let len = self.targets().len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    fn activate(&mut self) {
        let Some(target) = self.targets().get(self.selected).cloned() else {
            return;
        };
        match target {
            NavTarget::Node { path } => self.session.navigate(&path),
            NavTarget::Card { id, name } => self.pick_up(id, name),
        }
    }

    fn pick_up(&mut self, id: String, name: String) {
        let boards = self.session.store().boards();
        let Some(board) = boards.board_of_card(&id).and_then(|i| boards.board(i)) else {
            tracing::debug!(card = %id, "card is not on a mounted board");
            return;
        };
        let Some((column, _)) = board.locate_card(&id) else {
            return;
        };
        let columns = board
            .columns()
            .iter()
            .map(|col| {
                (
                    col.attr_str("id").unwrap_or_default(),
                    col.attr_str_any(&["name", "title"]).unwrap_or_default(),
                )
            })
            .collect();

        self.picked = Some(PickedCard {
            id,
            name,
            columns,
            column,
        });
    }

    fn move_key(&mut self, key: KeyInput) {
        let Some(picked) = self.picked.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => picked.column = picked.column.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                picked.column = (picked.column + 1).min(picked.columns.len().saturating_sub(1))
            }
            KeyCode::Enter => {
                let Some(picked) = self.picked.take() else {
                    return;
                };
                let Some((column_id, column_name)) = picked.columns.get(picked.column) else {
                    return;
                };
                if !self.session.drop_card(&picked.id, column_id) {
                    self.hint = Some(format!("{} stays in {}", picked.name, column_name));
                }
            }
            KeyCode::Escape => self.picked = None,
            _ => {}
        }
    }
}

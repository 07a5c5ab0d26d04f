//! TUI renderer for the interactive browser.
//!
//! One task, one thread: `tokio::select!` waits on terminal input and on
//! request completions from the dispatcher, applies whichever arrives, and
//! redraws. Requests themselves run as spawned tasks on the same runtime.

pub mod app;
pub mod keys;

pub use app::App;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{
        Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use futures::StreamExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
};
use rat_runtime::Completion;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::presentation::view_models::ScreenViewModel;
use crate::presentation::views::tui::{
    ChildColumnsView, ConsoleView, DocumentView, OverlayView, StatusBarView,
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub struct TuiRenderer {
    app: App,
}

impl TuiRenderer {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Take over the terminal until the user quits, restoring it afterwards
    /// even when the loop fails.
    pub async fn run(self, rx: UnboundedReceiver<Completion>) -> Result<()> {
        let (mut terminal, enhanced) = setup_terminal()?;
        let result = self.event_loop(&mut terminal, rx).await;
        restore_terminal(&mut terminal, enhanced)?;
        result
    }

    async fn event_loop(
        mut self,
        terminal: &mut Term,
        mut rx: UnboundedReceiver<Completion>,
    ) -> Result<()> {
        let mut events = EventStream::new();

        loop {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(input) = keys::key_input(&key) {
                            self.app.on_key(input);
                        }
                    }
                    // Resize and everything else just redraws.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                completion = rx.recv() => match completion {
                    Some(completion) => self.app.apply(completion),
                    None => break,
                },
            }

            if self.app.should_quit() {
                tracing::info!("quit requested");
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        // The document pane has a border on each side.
        let width = usize::from(area.width.saturating_sub(2));
        let scroll = self.app.scroll();
        let screen = self.app.layout(width);
        render_screen(frame, screen, scroll);
    }
}

fn render_screen(frame: &mut Frame, screen: &ScreenViewModel, scroll: u16) {
    let [console, body, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    frame.render_widget(ConsoleView::new(&screen.console, screen.selected), console);

    let document = DocumentView::new(&screen.document, screen.document_offset)
        .error(screen.error.as_deref())
        .selected(screen.selected)
        .scroll(scroll);
    if screen.children.is_empty() {
        frame.render_widget(document, body);
    } else {
        let [top, bottom] =
            Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
        frame.render_widget(document, top);
        frame.render_widget(
            ChildColumnsView::new(&screen.children, screen.children_offset, screen.selected),
            bottom,
        );
    }

    frame.render_widget(StatusBarView::new(&screen.status), status);

    if let Some(overlay) = &screen.overlay {
        frame.render_widget(OverlayView::new(overlay), frame.area());
    }
}

/// Raw mode, alternate screen and, where the terminal supports it, the
/// keyboard protocol that reports Ctrl+Shift+K apart from Ctrl+K. Returns
/// whether the keyboard flags were pushed.
fn setup_terminal() -> Result<(Term, bool)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let enhanced = supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )
        .is_ok();
    if !enhanced {
        tracing::info!("keyboard enhancement unavailable; Ctrl+N opens the new-node prompt");
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok((terminal, enhanced))
}

fn restore_terminal(terminal: &mut Term, enhanced: bool) -> Result<()> {
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

pub mod tui;

pub use tui::{App, TuiRenderer};

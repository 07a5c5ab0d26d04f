// NOTE: rat client layering
//
// - rat-engine is pure: it renders ASTs, reconciles kanban drops and drives
//   the overlays, but never touches the network or the terminal.
// - rat-runtime owns the server conversation and the session state.
// - This crate is only the outer shell: argument parsing, logging, and the
//   presentation pipeline (handler -> presenter -> view model -> view).

mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod presentation;

pub use args::{Cli, Commands, LogLevel};
pub use commands::run;

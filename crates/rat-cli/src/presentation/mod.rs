//! # Presentation Layer
//!
//! Data flows one way:
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ View ] --> [ Output ]
//! ```
//!
//! - `view_models/`: plain data, `Serialize`, no engine types.
//! - `presenters/`: pure functions from engine/runtime state to view models.
//!   Layout decisions that depend on width (wrapping, kanban columns, table
//!   alignment) happen here so both the TUI and `rat show` share them.
//! - `views/`: `fmt::Display` for console output, ratatui `Widget`s for the
//!   TUI. Styling only.
//! - `renderers/`: the TUI event loop. Owns UI state (selection, scroll,
//!   picked-up card) but not data.

pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

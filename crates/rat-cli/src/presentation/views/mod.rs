pub mod node;
pub mod tui;

pub use node::{NodeView, PathListView};

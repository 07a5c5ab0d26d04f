pub mod document;
pub mod node;
pub mod screen;

pub use document::{fit, present_document};
pub use node::{present_children, present_node, present_paths};
pub use screen::{Activity, present_screen};

mod ast;
mod node;

pub use ast::*;
pub use node::*;

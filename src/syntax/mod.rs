pub mod ast;
pub mod position;

pub use ast::*;
pub use position::LineIndex;

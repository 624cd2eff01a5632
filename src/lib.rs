pub mod cli;
pub mod syntax;
pub mod transpiler;

// Re-export commonly used items
pub use syntax::ast::{Decl, DeclKind, SourceFile};
pub use transpiler::{TranspileError, parse_source, transpile, transpile_source};

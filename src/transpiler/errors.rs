use crate::transpiler::parser::ParseError;
use std::fmt::Debug;
use std::io;
use thiserror::Error;

/// Every way a translation can fail. Any error aborts the whole unit.
#[derive(Error, Debug)]
pub enum TranspileError {
    #[error("failed to parse: {0}")]
    Parse(#[from] ParseError),

    #[error("line {line}: unsupported return type: {dump}")]
    UnsupportedReturnType { line: usize, dump: String },

    #[error("line {line}: unsupported receiver: {dump}")]
    UnsupportedReceiver { line: usize, dump: String },

    #[error("line {line}: unsupported parameters: {dump}")]
    UnsupportedParameters { line: usize, dump: String },

    #[error("line {line}: unsupported type: {name}")]
    UnsupportedType { line: usize, name: String },

    #[error("line {line}: unsupported statement: {dump}")]
    UnsupportedStatement { line: usize, dump: String },

    #[error("line {line}: unsupported expression: {dump}")]
    UnsupportedExpression { line: usize, dump: String },

    #[error("line {line}: unsupported value spec: {dump}")]
    UnsupportedSpec { line: usize, dump: String },

    #[error("line {line}: unsupported declaration: {dump}")]
    UnsupportedDecl { line: usize, dump: String },

    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

impl TranspileError {
    /// Source line the failure is attributed to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            TranspileError::Parse(err) => Some(err.line),
            TranspileError::UnsupportedReturnType { line, .. }
            | TranspileError::UnsupportedReceiver { line, .. }
            | TranspileError::UnsupportedParameters { line, .. }
            | TranspileError::UnsupportedType { line, .. }
            | TranspileError::UnsupportedStatement { line, .. }
            | TranspileError::UnsupportedExpression { line, .. }
            | TranspileError::UnsupportedSpec { line, .. }
            | TranspileError::UnsupportedDecl { line, .. } => Some(*line),
            TranspileError::Read(_) | TranspileError::Write(_) => None,
        }
    }
}

/// Stable multi-line rendering of a syntax node for diagnostics.
pub fn dump<T: Debug>(node: &T) -> String {
    format!("{node:#?}")
}

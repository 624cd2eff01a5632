pub mod codegen;
pub mod errors;
pub mod parser;
pub mod types;
pub mod writer;

pub use codegen::CCodeGenerator;
pub use errors::TranspileError;
pub use parser::parse_source;

use std::io::{Read, Write};

/// Translates Go source text into C source text.
pub fn transpile_source(source: &str) -> Result<String, TranspileError> {
    let file = parse_source(source)?;
    CCodeGenerator::new().generate(&file)
}

/// Reads one Go unit from `input` and writes its C translation to `out`.
///
/// Output is written in a single call once the whole unit has translated;
/// on error `out` is left untouched. Returns the number of bytes written.
pub fn transpile<W: Write, R: Read>(mut out: W, mut input: R) -> Result<usize, TranspileError> {
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .map_err(TranspileError::Read)?;

    let code = transpile_source(&source)?;
    out.write_all(code.as_bytes())
        .map_err(TranspileError::Write)?;

    Ok(code.len())
}

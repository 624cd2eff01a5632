use crate::syntax::ast::{BasicLit, Binding, Expr, LitKind, TypeExpr};
use crate::transpiler::errors::{TranspileError, dump};
use log::trace;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The C types a binding can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CType {
    Int,
    String,
}

impl CType {
    pub fn from_go(ty: &TypeExpr) -> Option<Self> {
        match ty {
            TypeExpr::Named {
                package: None,
                name,
            } => Self::from_go_name(name),
            _ => None,
        }
    }

    pub fn from_go_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(CType::Int),
            "string" => Some(CType::String),
            _ => None,
        }
    }

    /// Type of an untyped literal, following Go's default types.
    pub fn infer(lit: &BasicLit) -> Option<Self> {
        Self::from_go_name(lit.kind.default_type())
    }

    /// Whether a literal of `kind` can initialize a value of this type.
    pub fn accepts(self, kind: LitKind) -> bool {
        match self {
            CType::Int => matches!(kind, LitKind::Int | LitKind::Char),
            CType::String => kind == LitKind::String,
        }
    }

    pub fn zero_value(self) -> &'static str {
        match self {
            CType::Int => "0",
            CType::String => "\"\"",
        }
    }

    /// Spelling of the type. A constant string makes the pointer itself
    /// immutable, not just the characters.
    pub fn spelling(self, storage: Storage) -> &'static str {
        match (self, storage) {
            (CType::Int, Storage::Var) => "int",
            (CType::Int, Storage::Const) => "const int",
            (CType::String, Storage::Var) => "const char *",
            (CType::String, Storage::Const) => "const char * const",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Const,
    Var,
}

/// A fully mapped C declaration, rendered without the trailing `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CBinding {
    pub storage: Storage,
    pub ty: CType,
    pub name: String,
    pub value: String,
}

impl Display for CBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {} = {}",
            self.ty.spelling(self.storage),
            self.name,
            self.value
        )
    }
}

pub fn map_binding(binding: &Binding<'_>, storage: Storage) -> Result<CBinding, TranspileError> {
    let line = binding.line;
    let literal = match binding.value {
        Some(Expr::BasicLit(lit)) => Some(lit),
        Some(other) => {
            return Err(TranspileError::UnsupportedExpression {
                line,
                dump: dump(other),
            });
        }
        None => None,
    };

    let ty = match (binding.ty, literal) {
        (Some(ty), _) => CType::from_go(ty).ok_or_else(|| TranspileError::UnsupportedType {
            line,
            name: ty.to_string(),
        })?,
        (None, Some(lit)) => CType::infer(lit).ok_or_else(|| TranspileError::UnsupportedType {
            line,
            name: lit.kind.default_type().to_string(),
        })?,
        (None, None) => {
            return Err(TranspileError::UnsupportedSpec {
                line,
                dump: dump(binding),
            });
        }
    };

    let value = match literal {
        Some(lit) if !ty.accepts(lit.kind) => {
            return Err(TranspileError::UnsupportedExpression {
                line,
                dump: dump(lit),
            });
        }
        Some(lit) => c_literal(lit).ok_or_else(|| TranspileError::UnsupportedExpression {
            line,
            dump: dump(lit),
        })?,
        None => ty.zero_value().to_string(),
    };

    trace!("line {line}: {} mapped to {ty:?}", binding.name);
    Ok(CBinding {
        storage,
        ty,
        name: binding.name.to_string(),
        value,
    })
}

/// C spelling of a Go literal. Text is kept as written unless C cannot
/// express it; `None` if the value does not fit in 64 bits.
pub fn c_literal(lit: &BasicLit) -> Option<String> {
    match lit.kind {
        LitKind::Int => c_int_literal(&lit.value),
        LitKind::String if lit.value.starts_with('`') => Some(c_raw_string(&lit.value)),
        LitKind::String | LitKind::Float | LitKind::Imag | LitKind::Char => {
            Some(lit.value.clone())
        }
    }
}

fn c_int_literal(text: &str) -> Option<String> {
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (&lower[1..], 8)
    } else {
        (lower.as_str(), 10)
    };
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    let value = u64::from_str_radix(&digits, radix).ok()?;

    // C reads decimal, hex and legacy octal as written
    let rewrite = text.contains('_') || lower.starts_with("0b") || lower.starts_with("0o");
    Some(if rewrite {
        value.to_string()
    } else {
        text.to_string()
    })
}

fn c_raw_string(text: &str) -> String {
    let body = &text[1..text.len() - 1];
    let mut out = String::with_capacity(body.len() + 2);
    out.push('"');
    for c in body.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

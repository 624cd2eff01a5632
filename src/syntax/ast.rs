use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

pub use crate::syntax::position::Span;

/// A `//` or `/* */` comment, text kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

impl Comment {
    pub fn new(text: &str, span: Span) -> Self {
        Self {
            text: text.to_string(),
            span,
        }
    }
}

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFile {
    /// Comments preceding the package clause.
    pub doc: Vec<Comment>,
    pub package: String,
    pub package_span: Span,
    pub decls: Vec<Decl>,
    /// Comments after the last declaration.
    pub trailing: Vec<Comment>,
}

impl SourceFile {
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls
            .iter()
            .filter_map(|decl| match &decl.kind {
                DeclKind::Import(group) => Some(group),
                _ => None,
            })
            .flat_map(|group| group.specs.iter())
    }

    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match &decl.kind {
            DeclKind::Func(func) => Some(func),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decl {
    pub leading: Vec<Comment>,
    pub span: Span,
    pub kind: DeclKind,
}

impl Decl {
    pub fn new(start: usize, end: usize, kind: DeclKind) -> Self {
        Self {
            leading: Vec::new(),
            span: Span::new(start, end),
            kind,
        }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeclKind {
    Import(ImportGroup),
    Const(ValueGroup),
    Var(ValueGroup),
    Type(TypeGroup),
    Func(FuncDecl),
}

impl DeclKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            DeclKind::Import(_) => "import",
            DeclKind::Const(_) => "const",
            DeclKind::Var(_) => "var",
            DeclKind::Type(_) => "type",
            DeclKind::Func(_) => "func",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportGroup {
    pub grouped: bool,
    pub specs: Vec<ImportSpec>,
    pub closing: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpec {
    pub leading: Vec<Comment>,
    pub alias: Option<String>,
    /// Import path including its quotes.
    pub path: String,
    pub span: Span,
}

/// A `const` or `var` declaration, parenthesized or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueGroup {
    pub grouped: bool,
    pub specs: Vec<ValueSpec>,
    pub closing: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueSpec {
    pub leading: Vec<Comment>,
    pub names: Vec<String>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
    pub span: Span,
}

impl ValueSpec {
    /// Expands the spec into one binding per name. Returns `None` when the
    /// spec is meaningless on its own: no type and no values, or a value
    /// count that differs from the name count.
    pub fn bindings(&self) -> Option<Vec<Binding<'_>>> {
        if self.ty.is_none() && self.values.is_empty() {
            return None;
        }
        if !self.values.is_empty() && self.values.len() != self.names.len() {
            return None;
        }
        let bindings = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| Binding {
                name,
                ty: self.ty.as_ref(),
                value: self.values.get(i),
                line: self.span.line,
            })
            .collect();
        Some(bindings)
    }
}

/// A single name with its optional declared type and optional initializer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub ty: Option<&'a TypeExpr>,
    pub value: Option<&'a Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeGroup {
    pub grouped: bool,
    pub specs: Vec<TypeSpec>,
    pub closing: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSpec {
    pub leading: Vec<Comment>,
    pub name: String,
    pub alias: bool,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncDecl {
    pub receiver: Option<FieldList>,
    pub name: String,
    pub params: FieldList,
    pub results: Option<FieldList>,
    pub body: Block,
}

impl FuncDecl {
    /// True when the function declares no result, written either as nothing
    /// or as an empty `()`.
    pub fn returns_nothing(&self) -> bool {
        self.results.as_ref().is_none_or(|results| results.fields.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldList {
    pub fields: Vec<Field>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub closing: Vec<Comment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub leading: Vec<Comment>,
    pub span: Span,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(start: usize, end: usize, kind: StmtKind) -> Self {
        Self {
            leading: Vec::new(),
            span: Span::new(start, end),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    /// `a, b := 1, 2`
    ShortVarDecl { names: Vec<String>, values: Vec<Expr> },
    Var(ValueGroup),
    Const(ValueGroup),
    Assign { lhs: Vec<Expr>, op: String, rhs: Vec<Expr> },
    IncDec { target: Expr, op: String },
    Expr(Expr),
    Return(Vec<Expr>),
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        then: Block,
        otherwise: Option<Box<Stmt>>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        expr: Expr,
        body: Block,
    },
    Go(Expr),
    Defer(Expr),
    Break(Option<String>),
    Continue(Option<String>),
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

impl LitKind {
    /// The type Go gives an untyped constant of this kind.
    pub fn default_type(self) -> &'static str {
        match self {
            LitKind::Int => "int",
            LitKind::Float => "float64",
            LitKind::Imag => "complex128",
            LitKind::Char => "rune",
            LitKind::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicLit {
    pub kind: LitKind,
    /// Literal text as written in the source.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    BasicLit(BasicLit),
    Ident(String),
    Selector { operand: Box<Expr>, field: String },
    Call { func: Box<Expr>, args: Vec<Expr> },
    Index { operand: Box<Expr>, index: Box<Expr> },
    Unary { op: String, operand: Box<Expr> },
    Binary { op: String, lhs: Box<Expr>, rhs: Box<Expr> },
    Paren(Box<Expr>),
}

impl Expr {
    pub fn as_literal(&self) -> Option<&BasicLit> {
        match self {
            Expr::BasicLit(lit) => Some(lit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeExpr {
    Named { package: Option<String>, name: String },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan(Box<TypeExpr>),
    Struct(Vec<Field>),
    Interface,
}

impl TypeExpr {
    pub fn named(name: &str) -> Self {
        TypeExpr::Named {
            package: None,
            name: name.to_string(),
        }
    }
}

/// Renders the type the way it is spelled in Go.
impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TypeExpr::Named {
                package: Some(package),
                name,
            } => write!(f, "{package}.{name}"),
            TypeExpr::Named {
                package: None,
                name,
            } => write!(f, "{name}"),
            TypeExpr::Pointer(elem) => write!(f, "*{elem}"),
            TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Chan(elem) => write!(f, "chan {elem}"),
            TypeExpr::Struct(fields) => {
                if fields.is_empty() {
                    return write!(f, "struct{{}}");
                }
                write!(f, "struct {{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    match &field.name {
                        Some(name) => write!(f, "{name} {}", field.ty)?,
                        None => write!(f, "{}", field.ty)?,
                    }
                }
                write!(f, " }}")
            }
            TypeExpr::Interface => write!(f, "interface{{}}"),
        }
    }
}

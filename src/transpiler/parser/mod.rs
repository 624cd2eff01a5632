pub mod comments;

use crate::syntax::ast::*;
use crate::syntax::LineIndex;
use log::debug;
use peg::error::ExpectedSet;
use thiserror::Error;

/// Name reported in parse errors for the anonymous input stream.
pub const SOURCE_NAME: &str = "src.go";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}:{line}:{column}: {message}")]
pub struct ParseError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    fn from_peg(source: &str, err: &peg::error::ParseError<peg::str::LineCol>) -> Self {
        Self {
            file: SOURCE_NAME.to_string(),
            line: err.location.line,
            column: err.location.column,
            message: format!(
                "expected {}, found {}",
                describe_expected(&err.expected),
                describe_found(source, err.location.offset)
            ),
        }
    }
}

fn describe_expected(expected: &ExpectedSet) -> String {
    let mut tokens: Vec<String> = expected
        .tokens()
        .map(|token| match token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
            Some(literal) => format!("'{literal}'"),
            None => token.to_string(),
        })
        .collect();
    tokens.sort();
    tokens.dedup();
    match tokens.as_slice() {
        [] => "valid syntax".to_string(),
        [only] => only.clone(),
        _ => format!("one of {}", tokens.join(", ")),
    }
}

fn describe_found(source: &str, offset: usize) -> String {
    let rest = source.get(offset..).unwrap_or_default();
    match rest.chars().next() {
        None => "'EOF'".to_string(),
        Some('\n') => "newline".to_string(),
        Some(c) if c.is_alphanumeric() || c == '_' => {
            let word: String = rest
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            format!("'{word}'")
        }
        Some(c) => format!("'{c}'"),
    }
}

fn lit(kind: LitKind, value: &str) -> BasicLit {
    BasicLit {
        kind,
        value: value.to_string(),
    }
}

fn binary(op: &str, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op: op.to_string(),
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

enum Suffix {
    Selector(String),
    Call(Vec<Expr>),
    Index(Expr),
}

impl Suffix {
    fn apply(self, operand: Expr) -> Expr {
        let operand = Box::new(operand);
        match self {
            Suffix::Selector(field) => Expr::Selector { operand, field },
            Suffix::Call(args) => Expr::Call {
                func: operand,
                args,
            },
            Suffix::Index(index) => Expr::Index {
                operand,
                index: Box::new(index),
            },
        }
    }
}

// PEG grammar for the accepted subset of Go. Comments are skipped here and
// collected separately by `comments::scan`.
peg::parser! {
    grammar go_parser() for str {
        // Whitespace that never terminates a statement
        rule _() = quiet!{([' ' | '\t' | '\r'] / inline_block_comment())*}

        // Whitespace including line breaks and line comments
        rule __() = quiet!{([' ' | '\t' | '\r' | '\n'] / line_comment() / block_comment())*}

        rule line_comment() = "//" (!"\n" [_])*
        rule block_comment() = "/*" (!"*/" [_])* "*/"
        rule inline_block_comment() = "/*" (!"*/" !"\n" [_])* "*/"

        // Statement terminator: `;`, end of line, end of input, a block
        // comment spanning lines, or a closing brace or paren on the same line
        rule eos() = quiet!{_ (";" / line_comment()? ("\n" / ![_]) / block_comment() / &['}' | ')'])}

        rule ident_start() = [c if c.is_alphabetic() || c == '_']
        rule ident_char() = [c if c.is_alphanumeric() || c == '_']

        rule keyword() = ("break" / "case" / "chan" / "const" / "continue" / "default"
            / "defer" / "else" / "fallthrough" / "for" / "func" / "goto" / "go" / "if"
            / "import" / "interface" / "map" / "package" / "range" / "return"
            / "select" / "struct" / "switch" / "type" / "var") !ident_char()

        rule ident() -> String
            = quiet!{!keyword() s:$(ident_start() ident_char()*) { s.to_string() }}
            / expected!("identifier")

        rule ident_list() -> Vec<String> = ident() ++ (_ "," __)

        // Literals
        rule digits() = ['0'..='9'] ['0'..='9' | '_']*
        rule exponent() = ['e' | 'E'] ['+' | '-']? digits()

        rule int_body()
            = "0" ['x' | 'X'] ['0'..='9' | 'a'..='f' | 'A'..='F' | '_']+
            / "0" ['b' | 'B'] ['0' | '1' | '_']+
            / "0" ['o' | 'O'] ['0'..='7' | '_']+
            / digits()

        rule float_body()
            = digits() "." digits()? exponent()?
            / digits() exponent()
            / "." digits() exponent()?

        rule number() -> BasicLit
            = s:$((float_body() / int_body()) "i") !ident_char() { lit(LitKind::Imag, s) }
            / s:$(float_body()) !ident_char() { lit(LitKind::Float, s) }
            / s:$(int_body()) !ident_char() { lit(LitKind::Int, s) }

        rule string_lit() -> BasicLit
            = s:$("\"" ("\\" [_] / !['"' | '\\' | '\n'] [_])* "\"") { lit(LitKind::String, s) }
            / s:$("`" (!"`" [_])* "`") { lit(LitKind::String, s) }

        rule char_lit() -> BasicLit
            = s:$("'" ("\\" [_] (!['\'' | '\n'] [_])* / !['\'' | '\\' | '\n'] [_]) "'") {
                lit(LitKind::Char, s)
            }

        rule basic_lit() -> BasicLit
            = quiet!{number() / string_lit() / char_lit()}
            / expected!("literal")

        // Types
        rule type_expr() -> TypeExpr
            = quiet!{type_inner()}
            / expected!("type")

        rule type_inner() -> TypeExpr
            = "*" _ t:type_inner() { TypeExpr::Pointer(Box::new(t)) }
            / "[" _ "]" _ t:type_inner() { TypeExpr::Slice(Box::new(t)) }
            / "[" _ len:$(int_body()) _ "]" _ t:type_inner() {
                TypeExpr::Array { len: len.to_string(), elem: Box::new(t) }
            }
            / "map" _ "[" _ key:type_inner() _ "]" _ value:type_inner() {
                TypeExpr::Map { key: Box::new(key), value: Box::new(value) }
            }
            / "chan" !ident_char() _ t:type_inner() { TypeExpr::Chan(Box::new(t)) }
            / "struct" _ "{" __ fields:(f:struct_field() eos() __ { f })* "}" {
                TypeExpr::Struct(fields.into_iter().flatten().collect())
            }
            / "interface" _ "{" __ "}" { TypeExpr::Interface }
            / "(" _ t:type_inner() _ ")" { t }
            / package:ident() "." name:ident() { TypeExpr::Named { package: Some(package), name } }
            / name:ident() { TypeExpr::Named { package: None, name } }

        rule struct_field() -> Vec<Field>
            = names:ident_list() _ ty:type_inner() {
                names.into_iter().map(|name| Field { name: Some(name), ty: ty.clone() }).collect()
            }
            / ty:type_inner() { vec![Field { name: None, ty }] }

        // Signatures
        rule field_list() -> FieldList
            = start:position!() "(" __ fields:(param() ** (_ "," __)) (_ ",")? __ ")" end:position!() {
                FieldList { fields, span: Span::new(start, end) }
            }

        rule param() -> Field
            = name:ident() _ ty:type_expr() { Field { name: Some(name), ty } }
            / ty:type_expr() { Field { name: None, ty } }

        rule results() -> FieldList
            = field_list()
            / start:position!() ty:type_expr() end:position!() {
                FieldList { fields: vec![Field { name: None, ty }], span: Span::new(start, end) }
            }

        // Expressions
        rule expr_list() -> Vec<Expr> = expr() ++ (_ "," __)

        rule expr() -> Expr = precedence!{
            x:(@) _ "||" __ y:@ { binary("||", x, y) }
            --
            x:(@) _ "&&" __ y:@ { binary("&&", x, y) }
            --
            x:(@) _ op:$("==" / "!=" / "<=" / ">=" / "<" !['<' | '-'] / ">" !">") __ y:@ { binary(op, x, y) }
            --
            x:(@) _ op:$("+" !['+' | '='] / "-" !['-' | '='] / "|" !['|' | '='] / "^" !"=") __ y:@ {
                binary(op, x, y)
            }
            --
            x:(@) _ op:$("*" !"=" / "/" !['/' | '*' | '='] / "%" !"=" / "<<" !"=" / ">>" !"="
                / "&^" !"=" / "&" !['&' | '^' | '=']) __ y:@ {
                binary(op, x, y)
            }
            --
            op:$("-" / "+" / "!" / "^" / "*" / "&" / "<-") _ x:@ {
                Expr::Unary { op: op.to_string(), operand: Box::new(x) }
            }
            --
            p:primary() { p }
        }

        rule primary() -> Expr
            = base:operand() suffixes:suffix()* {
                suffixes.into_iter().fold(base, |operand, suffix| suffix.apply(operand))
            }

        rule operand() -> Expr
            = l:basic_lit() { Expr::BasicLit(l) }
            / name:ident() { Expr::Ident(name) }
            / "(" __ e:expr() __ ")" { Expr::Paren(Box::new(e)) }

        rule suffix() -> Suffix
            = _ "." _ field:ident() { Suffix::Selector(field) }
            / _ "(" __ args:(expr() ** (_ "," __)) (_ ",")? __ ")" { Suffix::Call(args) }
            / _ "[" __ index:expr() __ "]" { Suffix::Index(index) }

        // Statements
        rule block() -> Block
            = start:position!() "{" __ stmts:(s:stmt() eos() __ { s })* "}" end:position!() {
                Block { stmts, closing: Vec::new(), span: Span::new(start, end) }
            }

        rule stmt() -> Stmt
            = start:position!() kind:stmt_kind() end:position!() { Stmt::new(start, end, kind) }

        rule stmt_kind() -> StmtKind
            = "var" !ident_char() _ group:var_group() { StmtKind::Var(group) }
            / "const" !ident_char() _ group:const_group() { StmtKind::Const(group) }
            / "return" !ident_char() values:(_ v:expr_list() { v })? {
                StmtKind::Return(values.unwrap_or_default())
            }
            / "if" !ident_char() _ s:if_stmt() { s }
            / "for" !ident_char() _ s:for_stmt() { s }
            / "go" !ident_char() _ e:expr() { StmtKind::Go(e) }
            / "defer" !ident_char() _ e:expr() { StmtKind::Defer(e) }
            / "break" !ident_char() label:(_ l:ident() { l })? { StmtKind::Break(label) }
            / "continue" !ident_char() label:(_ l:ident() { l })? { StmtKind::Continue(label) }
            / b:block() { StmtKind::Block(b) }
            / simple_stmt()

        rule simple_stmt() -> StmtKind
            = names:ident_list() _ ":=" __ values:expr_list() {
                StmtKind::ShortVarDecl { names, values }
            }
            / lhs:expr_list() _ op:$(assign_op()) __ rhs:expr_list() {
                StmtKind::Assign { lhs, op: op.to_string(), rhs }
            }
            / target:expr() _ op:$("++" / "--") { StmtKind::IncDec { target, op: op.to_string() } }
            / e:expr() { StmtKind::Expr(e) }

        rule assign_op()
            = "=" !"=" / "+=" / "-=" / "*=" / "/=" / "%=" / "&^=" / "&=" / "|=" / "^=" / "<<=" / ">>="

        rule simple() -> Stmt
            = start:position!() kind:simple_stmt() end:position!() { Stmt::new(start, end, kind) }

        rule if_stmt() -> StmtKind
            = init:(s:simple() _ ";" _ { s })? cond:expr() _ then:block()
              otherwise:(_ "else" !ident_char() _ e:else_branch() { e })? {
                StmtKind::If {
                    init: init.map(Box::new),
                    cond,
                    then,
                    otherwise: otherwise.map(Box::new),
                }
            }

        rule else_branch() -> Stmt
            = start:position!() "if" !ident_char() _ kind:if_stmt() end:position!() {
                Stmt::new(start, end, kind)
            }
            / start:position!() b:block() end:position!() { Stmt::new(start, end, StmtKind::Block(b)) }

        rule for_stmt() -> StmtKind
            = lhs:(k:expr() v:(_ "," _ v:expr() { v })? _ op:$(":=" / "=") _ { (k, v, op == ":=") })?
              "range" !ident_char() _ expr:expr() _ body:block() {
                let (key, value, define) = match lhs {
                    Some((key, value, define)) => (Some(key), value, define),
                    None => (None, None, false),
                };
                StmtKind::Range { key, value, define, expr, body }
            }
            / init:simple()? _ ";" _ cond:expr()? _ ";" _ post:simple()? _ body:block() {
                StmtKind::For { init: init.map(Box::new), cond, post: post.map(Box::new), body }
            }
            / cond:expr()? _ body:block() {
                StmtKind::For { init: None, cond, post: None, body }
            }

        // Declarations
        rule const_group() -> ValueGroup
            = "(" __ specs:(s:const_spec() eos() __ { s })* ")" {
                ValueGroup { grouped: true, specs, closing: Vec::new() }
            }
            / spec:const_spec() { ValueGroup { grouped: false, specs: vec![spec], closing: Vec::new() } }

        // Bare names are accepted here and rejected by the code generator
        rule const_spec() -> ValueSpec
            = start:position!() names:ident_list() ty:(_ t:type_expr() { t })?
              values:(_ "=" __ v:expr_list() { v })? end:position!() {
                ValueSpec {
                    leading: Vec::new(),
                    names,
                    ty,
                    values: values.unwrap_or_default(),
                    span: Span::new(start, end),
                }
            }

        rule var_group() -> ValueGroup
            = "(" __ specs:(s:var_spec() eos() __ { s })* ")" {
                ValueGroup { grouped: true, specs, closing: Vec::new() }
            }
            / spec:var_spec() { ValueGroup { grouped: false, specs: vec![spec], closing: Vec::new() } }

        rule var_spec() -> ValueSpec
            = start:position!() names:ident_list() _ ty:type_expr()
              values:(_ "=" __ v:expr_list() { v })? end:position!() {
                ValueSpec {
                    leading: Vec::new(),
                    names,
                    ty: Some(ty),
                    values: values.unwrap_or_default(),
                    span: Span::new(start, end),
                }
            }
            / start:position!() names:ident_list() _ "=" __ values:expr_list() end:position!() {
                ValueSpec { leading: Vec::new(), names, ty: None, values, span: Span::new(start, end) }
            }

        rule type_group() -> TypeGroup
            = "(" __ specs:(s:type_spec() eos() __ { s })* ")" {
                TypeGroup { grouped: true, specs, closing: Vec::new() }
            }
            / spec:type_spec() { TypeGroup { grouped: false, specs: vec![spec], closing: Vec::new() } }

        rule type_spec() -> TypeSpec
            = start:position!() name:ident() _ alias:("=" _)? ty:type_expr() end:position!() {
                TypeSpec { leading: Vec::new(), name, alias: alias.is_some(), ty, span: Span::new(start, end) }
            }

        rule import_group() -> ImportGroup
            = "(" __ specs:(s:import_spec() eos() __ { s })* ")" {
                ImportGroup { grouped: true, specs, closing: Vec::new() }
            }
            / spec:import_spec() { ImportGroup { grouped: false, specs: vec![spec], closing: Vec::new() } }

        rule import_spec() -> ImportSpec
            = start:position!() alias:(a:(ident() / "." { ".".to_string() }) _ { a })?
              path:import_path() end:position!() {
                ImportSpec { leading: Vec::new(), alias, path, span: Span::new(start, end) }
            }

        rule import_path() -> String
            = quiet!{l:string_lit() { l.value }}
            / expected!("import path")

        rule func_decl() -> FuncDecl
            = "func" !ident_char() _ receiver:(r:field_list() _ { r })? name:ident() _
              params:field_list() results:(_ r:results() { r })? _ body:block() {
                FuncDecl { receiver, name, params, results, body }
            }

        rule import_decl() -> Decl
            = start:position!() "import" !ident_char() _ group:import_group() end:position!() {
                Decl::new(start, end, DeclKind::Import(group))
            }

        rule top_decl() -> Decl
            = start:position!() kind:decl_kind() end:position!() { Decl::new(start, end, kind) }

        rule decl_kind() -> DeclKind
            = "const" !ident_char() _ group:const_group() { DeclKind::Const(group) }
            / "var" !ident_char() _ group:var_group() { DeclKind::Var(group) }
            / "type" !ident_char() _ group:type_group() { DeclKind::Type(group) }
            / func:func_decl() { DeclKind::Func(func) }

        pub rule source_file() -> SourceFile
            = __ package_start:position!() "package" !ident_char() _ package:ident() package_end:position!() eos() __
              imports:(d:import_decl() eos() __ { d })*
              decls:(d:top_decl() eos() __ { d })*
              ![_] {
                let mut all = imports;
                all.extend(decls);
                SourceFile {
                    doc: Vec::new(),
                    package,
                    package_span: Span::new(package_start, package_end),
                    decls: all,
                    trailing: Vec::new(),
                }
            }
    }
}

/// Parses a Go source file, resolves line numbers and attaches comments to
/// the declarations and statements they precede.
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    let mut file =
        go_parser::source_file(source).map_err(|err| ParseError::from_peg(source, &err))?;

    let lines = LineIndex::new(source);
    let found = comments::scan(source);
    debug!(
        "parsed package {} with {} declarations and {} comments",
        file.package,
        file.decls.len(),
        found.len()
    );
    comments::attach(&mut file, found, &lines);

    Ok(file)
}

use goc::{TranspileError, transpile, transpile_source};
use std::io::{self, Write};

fn failure(source: &str) -> TranspileError {
    let mut out = Vec::new();
    let err = transpile(&mut out, source.as_bytes()).expect_err("translation should fail");
    assert!(
        out.is_empty(),
        "failed translation wrote output: {:?}",
        String::from_utf8_lossy(&out)
    );
    err
}

fn first_line(err: &TranspileError) -> String {
    err.to_string().lines().next().unwrap_or_default().to_string()
}

#[test]
fn test_earlier_declarations_are_discarded_on_failure() {
    let err = failure("package a\nconst a = 1\nvar b = \"x\"\n\nfunc f() int {\n\treturn 1\n}\n");
    assert!(matches!(err, TranspileError::UnsupportedReturnType { line: 5, .. }));
}

#[test]
fn test_single_result_type_is_unsupported() {
    let err = failure("package a\nfunc f() string { return \"\" }");
    assert_eq!(first_line(&err), "line 2: unsupported return type: FieldList {");
}

#[test]
fn test_empty_result_list_is_void() {
    assert_eq!(
        transpile_source("package a\nfunc f() () {}").unwrap(),
        "void f() {\n}\n"
    );
}

#[test]
fn test_parameters_are_unsupported() {
    let err = failure("package a\nfunc f(x int) {}");
    assert_eq!(first_line(&err), "line 2: unsupported parameters: FieldList {");
}

#[test]
fn test_methods_are_unsupported() {
    let err = failure("package a\ntype T int\n");
    assert!(matches!(err, TranspileError::UnsupportedDecl { line: 2, .. }));

    let err = failure("package a\n\n\nfunc (t T) m() {}");
    assert_eq!(first_line(&err), "line 4: unsupported receiver: FieldList {");
}

#[test]
fn test_unknown_declared_type() {
    let err = failure("package a\nvar (\n\tok int\n\tratio float64\n)\n");
    assert_eq!(err.to_string(), "line 4: unsupported type: float64");
}

#[test]
fn test_qualified_and_pointer_types() {
    assert_eq!(
        failure("package a\nvar f *os.File").to_string(),
        "line 2: unsupported type: *os.File"
    );
    assert_eq!(
        failure("package a\nvar m map[string]int").to_string(),
        "line 2: unsupported type: map[string]int"
    );
}

#[test]
fn test_untyped_literals_without_c_mapping() {
    assert_eq!(
        failure("package a\nconst pi = 3.14").to_string(),
        "line 2: unsupported type: float64"
    );
    assert_eq!(
        failure("package a\nvar r = 'x'").to_string(),
        "line 2: unsupported type: rune"
    );
}

#[test]
fn test_non_literal_initializers() {
    let err = failure("package a\nvar a = 1 + 2");
    assert_eq!(first_line(&err), "line 2: unsupported expression: Binary {");

    let err = failure("package a\nconst (\n\ta = iota\n)");
    assert_eq!(first_line(&err), "line 3: unsupported expression: Ident(");

    let err = failure("package a\nvar n = -1");
    assert!(matches!(err, TranspileError::UnsupportedExpression { line: 2, .. }));
}

#[test]
fn test_int_literals_beyond_64_bits() {
    for literal in ["99999999999999999999999", "9_999_999_999_999_999_999_999", "0x10000000000000000"] {
        let err = failure(&format!("package a\nvar a = {literal}"));
        assert_eq!(
            first_line(&err),
            "line 2: unsupported expression: BasicLit {",
            "literal {literal}"
        );
    }
    assert_eq!(
        transpile_source("package a\nconst max = 18446744073709551615").unwrap(),
        "const int max = 18446744073709551615;\n"
    );
}

#[test]
fn test_literal_kind_must_fit_declared_type() {
    let err = failure("package a\nvar s string = 1");
    assert_eq!(first_line(&err), "line 2: unsupported expression: BasicLit {");

    let err = failure("package a\nconst (\n\tn int = \"one\"\n)");
    assert!(matches!(err, TranspileError::UnsupportedExpression { line: 3, .. }));

    assert_eq!(
        transpile_source("package a\nvar c int = 'x'").unwrap(),
        "int c = 'x';\n"
    );
}

#[test]
fn test_binding_without_type_or_value() {
    let err = failure("package a\nconst (\n\ta = 1\n\tb\n)\n");
    assert_eq!(first_line(&err), "line 4: unsupported value spec: ValueSpec {");
}

#[test]
fn test_value_count_mismatch() {
    let err = failure("package a\nconst a, b = 1");
    assert!(matches!(err, TranspileError::UnsupportedSpec { line: 2, .. }));
}

#[test]
fn test_unsupported_statements() {
    let cases = [
        ("x = 1", "Assign {"),
        ("x++", "IncDec {"),
        ("f()", "Expr("),
        ("return", "Return("),
        ("if true {\n\t}", "If {"),
        ("for {\n\t}", "For {"),
        ("var x int", "Var("),
        ("x := y", "ShortVarDecl {"),
        ("x, y := 1", "ShortVarDecl {"),
    ];
    for (stmt, dump_start) in cases {
        let source = format!("package a\n\nfunc f() {{\n\t{stmt}\n}}\n");
        let err = failure(&source);
        assert_eq!(
            first_line(&err),
            format!("line 4: unsupported statement: {dump_start}"),
            "statement {stmt:?}"
        );
    }
}

#[test]
fn test_statement_error_points_at_failing_line() {
    let err = failure("package a\nfunc f() {\n\ta := 1\n\tb := 2\n\tc := 1.5\n}\n");
    assert_eq!(err.to_string(), "line 5: unsupported type: float64");
}

#[test]
fn test_parse_errors_carry_position() {
    let err = failure("package a\n\nvar x =");
    assert!(matches!(err, TranspileError::Parse(_)));
    assert!(err.to_string().starts_with("failed to parse: src.go:3:"));
    assert_eq!(err.line(), Some(3));
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failures_are_reported() {
    let err = transpile(BrokenSink, "package a\nvar a = 1".as_bytes()).unwrap_err();
    assert!(matches!(err, TranspileError::Write(_)));
    assert_eq!(err.to_string(), "failed to write output: sink closed");
    assert_eq!(err.line(), None);
}

#[test]
fn test_invalid_utf8_is_a_read_error() {
    let mut out = Vec::new();
    let err = transpile(&mut out, &[0xff, 0xfe][..]).unwrap_err();
    assert!(matches!(err, TranspileError::Read(_)));
    assert!(out.is_empty());
}

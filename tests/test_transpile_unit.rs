use anyhow::Result;
use goc::transpile;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(source: &str) -> Result<String> {
    let mut out = Vec::new();
    let written = transpile(&mut out, source.as_bytes())?;
    assert_eq!(written, out.len());
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_transpile_unit() -> Result<()> {
    init_logging();
    let cases = [
        ("const a = 1", "const int a = 1;\n"),
        ("// Hi\nconst a = 1", "// Hi\nconst int a = 1;\n"),
        ("var a = 1", "int a = 1;\n"),
        ("var a = \"hi\"", "const char * a = \"hi\";\n"),
        ("const a = \"hi\"", "const char * const a = \"hi\";\n"),
        ("var (\na = 1\nb = 2\n)", "int a = 1;\nint b = 2;\n"),
        ("const (\na = 1\nb = 2\n)", "const int a = 1;\nconst int b = 2;\n"),
        ("func a() {}", "void a() {\n}\n"),
        ("// Import comment\nimport \"os\"", "// Import comment\n"),
        ("var a int", "int a = 0;\n"),
        ("var a string", "const char * a = \"\";\n"),
        ("var a, b int", "int a = 0;\nint b = 0;\n"),
        ("func a() {\n  a := 0\n}", "void a() {\n  int a = 0;\n}\n"),
        // Layout of the input body is not preserved.
        ("func a(){a:=0}", "void a() {\n  int a = 0;\n}\n"),
    ];

    for (i, (input, expected)) in cases.iter().enumerate() {
        let source = format!("package a\n{input}");
        let actual = run(&source)?;
        assert_eq!(&actual, expected, "case {i}: transpile({source:?})");
    }
    Ok(())
}

#[test]
fn test_transpile_doc() -> Result<()> {
    init_logging();
    let cases = [
        ("package a", ""),
        ("package a\n", ""),
        ("// Hi\npackage a\nvar a = 1", "// Hi\nint a = 1;\n"),
        ("/* Hi */\npackage a\nvar a = 1", "/* Hi */\nint a = 1;\n"),
        // Blank lines between comment blocks are not kept.
        ("// Hi\n\npackage a\nvar a = 1", "// Hi\nint a = 1;\n"),
        (
            "// Hi\n\n// Hi2\n\npackage a\nvar a = 1",
            "// Hi\n// Hi2\nint a = 1;\n",
        ),
    ];

    for (i, (input, expected)) in cases.iter().enumerate() {
        let actual = run(input)?;
        assert_eq!(&actual, expected, "case {i}: transpile({input:?})");
    }
    Ok(())
}

#[test]
fn test_unsupported_return_type_reports_line() {
    init_logging();
    let mut out = Vec::new();
    let input = "// Comment\npackage a\n\nfunc a() (int, error) {}";
    let err = transpile(&mut out, input.as_bytes()).unwrap_err();

    assert!(out.is_empty(), "unexpected output: {:?}", String::from_utf8_lossy(&out));
    let message = err.to_string();
    let first_line = message.lines().next().unwrap();
    assert_eq!(first_line, "line 4: unsupported return type: FieldList {");
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_empty_input_fails_to_parse() {
    init_logging();
    let mut out = Vec::new();
    let err = transpile(&mut out, &b""[..]).unwrap_err();

    assert!(out.is_empty());
    assert_eq!(
        err.to_string(),
        "failed to parse: src.go:1:1: expected 'package', found 'EOF'"
    );
}

#[test]
fn test_declarations_keep_source_order() -> Result<()> {
    let source = "package main\n\n\
        import (\n\t// for printing\n\t\"fmt\"\n)\n\n\
        // Version of the tool.\n\
        const Version = \"1.0\"\n\n\
        var (\n\tcount int\n\tname = \"x\"\n)\n\n\
        const Zero, One = 0, 1\n\n\
        // main does nothing yet.\n\
        func main() {\n\t// locals\n\ti := 3\n\ts := \"s\"\n}\n";
    let expected = "// for printing\n\
        // Version of the tool.\n\
        const char * const Version = \"1.0\";\n\
        int count = 0;\n\
        const char * name = \"x\";\n\
        const int Zero = 0;\n\
        const int One = 1;\n\
        // main does nothing yet.\n\
        void main() {\n  // locals\n  int i = 3;\n  const char * s = \"s\";\n}\n";
    assert_eq!(run(source)?, expected);
    Ok(())
}

#[test]
fn test_literal_spellings_are_normalised_for_c() -> Result<()> {
    let source = "package a\nvar (\n\tmask = 0x_FF\n\tbits = 0b101\n\tperm = 0o644\n\traw = `C:\\dir`\n)\n";
    let expected = "int mask = 255;\nint bits = 5;\nint perm = 420;\nconst char * raw = \"C:\\\\dir\";\n";
    assert_eq!(run(source)?, expected);
    Ok(())
}

#[test]
fn test_local_name_may_shadow_function() -> Result<()> {
    let source = "package a\nfunc a() {\n\ta, b := 1, \"two\"\n}\n";
    assert_eq!(
        run(source)?,
        "void a() {\n  int a = 1;\n  const char * b = \"two\";\n}\n"
    );
    Ok(())
}

#[test]
fn test_trailing_and_inline_comments_are_kept() -> Result<()> {
    let source = "package a\nvar a = 1 // one\nfunc f() {\n\tb := 2 /* two */\n}\n// end of file\n";
    let expected = "int a = 1;\n// one\nvoid f() {\n  int b = 2;\n  /* two */\n}\n// end of file\n";
    assert_eq!(run(source)?, expected);
    Ok(())
}

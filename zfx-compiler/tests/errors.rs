use zfx_compiler::ir::{RegId, StmtId};
use zfx_compiler::{compile_to_asm, parse_ir, CompileError, LowerOptions, MissingLoadPolicy};

// ── Fatal compilation errors ─────────────────────────────────────────────
// Each test verifies that an invalid program produces the correct error.

#[test]
fn unsupported_unary_operator() {
    let source = r#"
        $0 = const 1
        $1 = * $0
    "#;
    let result = compile_to_asm(source, &LowerOptions::default());
    match result {
        Err(CompileError::UnsupportedOperator { op, .. }) => assert_eq!(op, "*"),
        other => panic!("Expected unsupported operator error, got: {:?}", other),
    }
}

#[test]
fn unsupported_binary_operator() {
    let source = r#"
        $0 = const 1
        $1 = const 2
        $2 = $0 << $1
    "#;
    let result = compile_to_asm(source, &LowerOptions::default());
    match result {
        Err(CompileError::UnsupportedOperator { op, stmt, .. }) => {
            assert_eq!(op, "<<");
            assert_eq!(stmt.0, 5, "lowered statements are numbered after the input");
        }
        other => panic!("Expected unsupported operator error, got: {:?}", other),
    }
}

#[test]
fn strict_mode_rejects_undefined_values() {
    let source = "$0 = $1 + $1";
    let options = LowerOptions::default().with_missing_load(MissingLoadPolicy::Deny);
    match compile_to_asm(source, &options) {
        Err(CompileError::MissingDefinition { stmt, reg }) => {
            assert_eq!(stmt, StmtId(1));
            assert_eq!(reg, RegId(1));
        }
        other => panic!("Expected missing definition error, got: {:?}", other),
    }
}

#[test]
fn strict_mode_rejects_reading_own_result() {
    let options = LowerOptions::default().with_missing_load(MissingLoadPolicy::Deny);
    match compile_to_asm("$0 = $0 + $0", &options) {
        Err(CompileError::MissingDefinition { stmt, reg }) => {
            assert_eq!(stmt, StmtId(0));
            assert_eq!(reg, RegId(0));
        }
        other => panic!("Expected missing definition error, got: {:?}", other),
    }
    assert!(matches!(
        compile_to_asm("$0 = const 1\n$1 = - $1", &options),
        Err(CompileError::MissingDefinition { stmt: StmtId(1), .. })
    ));
}

#[test]
fn lenient_mode_accepts_undefined_values() {
    let source = "$0 = $1 + $1";
    let asm = compile_to_asm(source, &LowerOptions::default()).expect("should compile");
    assert_eq!(asm, "add 0 1 1\n");
}

#[test]
fn label_redefinition() {
    let source = "$0 = const 1\n$0 = const 2\n";
    assert_parse_error(parse_ir(source), 2, 1);
}

// ── Error location accuracy ─────────────────────────────────────────────

#[test]
fn error_location_single_line() {
    let source = "x = const 1";
    assert_parse_error(parse_ir(source), 1, 1);
}

#[test]
fn error_location_multiline() {
    let source = "$0 = const 1\n$1 = const\n";
    assert_parse_error(parse_ir(source), 2, 11);
}

#[test]
fn lexical_error_location() {
    let source = "$0 = const 1\n$1 = $ + $0\n";
    match parse_ir(source) {
        Err(CompileError::Lexical(e)) => {
            assert_eq!(e.line, 2, "Error should be on line 2, got {}", e.line);
            assert_eq!(e.column, 6, "Error should be at column 6, got {}", e.column);
            assert_eq!(e.unexpected_char, '$');
        }
        other => panic!("Expected lexical error, got: {:?}", other),
    }
}

#[test]
fn missing_statement_body() {
    let result = parse_ir("$0 =");
    assert!(matches!(result, Err(CompileError::Parse { .. })));
}

// ── Helper ───────────────────────────────────────────────────────────────

fn assert_parse_error(
    result: Result<zfx_compiler::ir::Ir, CompileError>,
    expected_line: usize,
    expected_col: usize,
) {
    match result {
        Ok(_) => panic!("Expected parse error, but parsing succeeded"),
        Err(CompileError::Parse { line, col, .. }) => {
            assert_eq!(line, expected_line, "Error should be on line {}, got {}", expected_line, line);
            assert_eq!(col, expected_col, "Error should be at column {}, got {}", expected_col, col);
        }
        Err(other) => panic!("Expected parse error, got: {:?}", other),
    }
}

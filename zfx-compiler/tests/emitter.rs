use zfx_compiler::ir::*;
use zfx_compiler::{emit_assembly, CompileError, OperatorArity};

fn unary(op: &str, dst: usize, src: usize) -> AsmUnaryOpStmt {
    AsmUnaryOpStmt { op: op.to_string(), dst: RegId(dst), src: RegId(src) }
}

fn binary(op: &str, dst: usize, lhs: usize, rhs: usize) -> AsmBinaryOpStmt {
    AsmBinaryOpStmt { op: op.to_string(), dst: RegId(dst), lhs: RegId(lhs), rhs: RegId(rhs) }
}

// ── Line formats ─────────────────────────────────────────────────────────

#[test]
fn every_assembly_kind_has_its_line_format() {
    let mut ir = Ir::new();
    ir.push(AsmLoadConstStmt { dst: RegId(0), name: "3.5".to_string() });
    ir.push(AsmLoadSymbolStmt { dst: RegId(1), name: "@Cd".to_string() });
    ir.push(AsmMemoryStoreStmt { val: RegId(1), mem: MemId(4) });
    ir.push(AsmMemoryLoadStmt { val: RegId(2), mem: MemId(4) });
    ir.push(AsmAssignStmt { dst: RegId(3), src: RegId(2) });
    ir.push(unary("+", 4, 3));
    ir.push(unary("-", 5, 4));

    let asm = emit_assembly(&ir).expect("emission should succeed");
    assert_eq!(
        asm.lines,
        vec![
            "ldi 0 3.5",
            "lds 1 @Cd",
            "st 1 4",
            "ld 2 4",
            "mov 3 2",
            "mov 4 3",
            "neg 5 4",
        ]
    );
}

#[test]
fn binary_operators_map_to_opcodes() {
    let mut ir = Ir::new();
    for op in ["+", "-", "*", "/", "%"] {
        ir.push(binary(op, 2, 0, 1));
    }
    let asm = emit_assembly(&ir).expect("emission should succeed");
    assert_eq!(
        asm.lines,
        vec!["add 2 0 1", "sub 2 0 1", "mul 2 0 1", "div 2 0 1", "mod 2 0 1"]
    );
}

#[test]
fn text_terminates_every_line() {
    let mut ir = Ir::new();
    ir.push(AsmAssignStmt { dst: RegId(0), src: RegId(1) });
    ir.push(AsmAssignStmt { dst: RegId(1), src: RegId(0) });
    let asm = emit_assembly(&ir).expect("emission should succeed");
    assert_eq!(asm.to_text(), "mov 0 1\nmov 1 0\n");
}

#[test]
fn empty_ir_gives_empty_text() {
    let asm = emit_assembly(&Ir::new()).expect("emission should succeed");
    assert!(asm.lines.is_empty());
    assert_eq!(asm.to_text(), "");
}

#[test]
fn lines_remember_their_statement() {
    let mut ir = Ir::new();
    let first = ir.push(AsmAssignStmt { dst: RegId(0), src: RegId(1) });
    let second = ir.push(binary("*", 0, 0, 0));
    let asm = emit_assembly(&ir).expect("emission should succeed");
    assert_eq!(asm.stmt_ids, vec![first, second]);
}

// ── Operator errors ──────────────────────────────────────────────────────

#[test]
fn unsupported_unary_operator_is_fatal() {
    let mut ir = Ir::new();
    ir.push(AsmLoadConstStmt { dst: RegId(0), name: "1".to_string() });
    let bad = ir.push(unary("*", 1, 0));

    match emit_assembly(&ir) {
        Err(CompileError::UnsupportedOperator { arity, op, stmt }) => {
            assert_eq!(arity, OperatorArity::Unary);
            assert_eq!(op, "*");
            assert_eq!(stmt, bad);
        }
        other => panic!("Expected UnsupportedOperator, got: {:?}", other),
    }
}

#[test]
fn unsupported_binary_operator_is_fatal() {
    let mut ir = Ir::new();
    let bad = ir.push(binary("^", 2, 0, 1));

    let err = emit_assembly(&ir).expect_err("`^` has no opcode");
    assert!(matches!(
        err,
        CompileError::UnsupportedOperator { arity: OperatorArity::Binary, ref op, stmt }
            if op == "^" && stmt == bad
    ));
    assert_eq!(err.to_string(), format!("invalid binary op `^` in {}", bad));
}

// ── Unlowered statements ─────────────────────────────────────────────────

#[test]
fn symbolic_statement_becomes_an_error_line() {
    let mut ir = Ir::new();
    ir.push(SymbolStmt { name: "@pos".to_string() });
    ir.push(AsmLoadConstStmt { dst: RegId(0), name: "1".to_string() });

    let asm = emit_assembly(&ir).expect("error lines are not fatal");
    assert_eq!(asm.lines, vec!["error unexpected SymbolStmt", "ldi 0 1"]);
    assert!(asm.has_errors());
    assert_eq!(asm.errors().count(), 1);
}

#[test]
fn every_symbolic_kind_is_reported_by_name() {
    let mut ir = Ir::new();
    let a = ir.push(LiteralStmt { name: "1".to_string() });
    let b = ir.push(BinaryOpStmt { op: "+".to_string(), lhs: a, rhs: a });
    let c = ir.push(UnaryOpStmt { op: "-".to_string(), src: b });
    ir.push(AssignStmt { dst: a, src: c });

    let asm = emit_assembly(&ir).expect("error lines are not fatal");
    assert_eq!(
        asm.lines,
        vec![
            "error unexpected LiteralStmt",
            "error unexpected BinaryOpStmt",
            "error unexpected UnaryOpStmt",
            "error unexpected AssignStmt",
        ]
    );
}

//! Assembly text output.
//!
//! One line per statement, operands separated by single spaces. Registers
//! and spill slots are printed as bare decimal indices.

use crate::ir::*;
use crate::{CompileError, OperatorArity};
use tracing::debug;

/// Rendered assembly with the lowered statement behind each line.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub lines: Vec<String>,
    pub stmt_ids: Vec<StmtId>,
}

impl Assembly {
    /// The full text, every line newline-terminated.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Lines reporting statements the emitter could not render.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|l| l.starts_with("error "))
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Opcode for a unary operator token.
pub fn unary_opcode(op: &str) -> Option<&'static str> {
    match op {
        "+" => Some("mov"),
        "-" => Some("neg"),
        _ => None,
    }
}

/// Opcode for a binary operator token.
pub fn binary_opcode(op: &str) -> Option<&'static str> {
    match op {
        "+" => Some("add"),
        "-" => Some("sub"),
        "*" => Some("mul"),
        "/" => Some("div"),
        "%" => Some("mod"),
        _ => None,
    }
}

pub(crate) struct EmitAssembly {
    asm: Assembly,
}

impl EmitAssembly {
    pub(crate) fn new() -> Self {
        Self { asm: Assembly::default() }
    }

    pub(crate) fn run(mut self, ir: &Ir) -> Result<Assembly, CompileError> {
        apply(&mut self, ir)?;
        debug!(lines = self.asm.lines.len(), "emitted assembly");
        Ok(self.asm)
    }

    fn emit(&mut self, stmt: &Stmt, line: String) {
        self.asm.lines.push(line);
        self.asm.stmt_ids.push(stmt.id);
    }
}

impl Visitor for EmitAssembly {
    fn visit_stmt(&mut self, stmt: &Stmt) -> VisitResult {
        self.emit(stmt, format!("error unexpected {}", stmt.kind.name()));
        Ok(())
    }

    fn visit_asm_unary_op(&mut self, stmt: &Stmt, asm: &AsmUnaryOpStmt) -> VisitResult {
        let opcode = unary_opcode(&asm.op).ok_or_else(|| CompileError::UnsupportedOperator {
            arity: OperatorArity::Unary,
            op: asm.op.clone(),
            stmt: stmt.id,
        })?;
        self.emit(stmt, format!("{} {} {}", opcode, asm.dst.0, asm.src.0));
        Ok(())
    }

    fn visit_asm_binary_op(&mut self, stmt: &Stmt, asm: &AsmBinaryOpStmt) -> VisitResult {
        let opcode = binary_opcode(&asm.op).ok_or_else(|| CompileError::UnsupportedOperator {
            arity: OperatorArity::Binary,
            op: asm.op.clone(),
            stmt: stmt.id,
        })?;
        self.emit(
            stmt,
            format!("{} {} {} {}", opcode, asm.dst.0, asm.lhs.0, asm.rhs.0),
        );
        Ok(())
    }

    fn visit_asm_memory_store(&mut self, stmt: &Stmt, asm: &AsmMemoryStoreStmt) -> VisitResult {
        self.emit(stmt, format!("st {} {}", asm.val.0, asm.mem.0));
        Ok(())
    }

    fn visit_asm_memory_load(&mut self, stmt: &Stmt, asm: &AsmMemoryLoadStmt) -> VisitResult {
        self.emit(stmt, format!("ld {} {}", asm.val.0, asm.mem.0));
        Ok(())
    }

    fn visit_asm_load_symbol(&mut self, stmt: &Stmt, asm: &AsmLoadSymbolStmt) -> VisitResult {
        self.emit(stmt, format!("lds {} {}", asm.dst.0, asm.name));
        Ok(())
    }

    fn visit_asm_load_const(&mut self, stmt: &Stmt, asm: &AsmLoadConstStmt) -> VisitResult {
        self.emit(stmt, format!("ldi {} {}", asm.dst.0, asm.name));
        Ok(())
    }

    fn visit_asm_assign(&mut self, stmt: &Stmt, asm: &AsmAssignStmt) -> VisitResult {
        self.emit(stmt, format!("mov {} {}", asm.dst.0, asm.src.0));
        Ok(())
    }
}

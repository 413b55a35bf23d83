//! Visitor dispatch over statement kinds.
//!
//! A pass implements [`Visitor`], overriding the `visit_*` methods for the
//! kinds it handles. Every other kind falls through to
//! [`Visitor::visit_stmt`], which each pass must provide. [`apply`] walks an
//! [`Ir`] front to back and dispatches each statement exactly once.

use super::ir::Ir;
use super::stmt::*;
use crate::CompileError;

pub type VisitResult = Result<(), CompileError>;

pub trait Visitor {
    /// Fallback for every kind the pass does not handle explicitly.
    fn visit_stmt(&mut self, stmt: &Stmt) -> VisitResult;

    // ── Symbolic ────────────────────────────────────────────────────────

    fn visit_symbol(&mut self, stmt: &Stmt, _sym: &SymbolStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_literal(&mut self, stmt: &Stmt, _lit: &LiteralStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_binary_op(&mut self, stmt: &Stmt, _op: &BinaryOpStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_unary_op(&mut self, stmt: &Stmt, _op: &UnaryOpStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_assign(&mut self, stmt: &Stmt, _assign: &AssignStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    // ── Assembly-level ──────────────────────────────────────────────────

    fn visit_asm_assign(&mut self, stmt: &Stmt, _asm: &AsmAssignStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_asm_binary_op(&mut self, stmt: &Stmt, _asm: &AsmBinaryOpStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_asm_unary_op(&mut self, stmt: &Stmt, _asm: &AsmUnaryOpStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_asm_load_const(&mut self, stmt: &Stmt, _asm: &AsmLoadConstStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_asm_load_symbol(&mut self, stmt: &Stmt, _asm: &AsmLoadSymbolStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_asm_memory_store(&mut self, stmt: &Stmt, _asm: &AsmMemoryStoreStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }

    fn visit_asm_memory_load(&mut self, stmt: &Stmt, _asm: &AsmMemoryLoadStmt) -> VisitResult {
        self.visit_stmt(stmt)
    }
}

/// Dispatch a single statement to the matching handler.
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) -> VisitResult {
    match &stmt.kind {
        StmtKind::Symbol(s) => visitor.visit_symbol(stmt, s),
        StmtKind::Literal(s) => visitor.visit_literal(stmt, s),
        StmtKind::BinaryOp(s) => visitor.visit_binary_op(stmt, s),
        StmtKind::UnaryOp(s) => visitor.visit_unary_op(stmt, s),
        StmtKind::Assign(s) => visitor.visit_assign(stmt, s),
        StmtKind::AsmAssign(s) => visitor.visit_asm_assign(stmt, s),
        StmtKind::AsmBinaryOp(s) => visitor.visit_asm_binary_op(stmt, s),
        StmtKind::AsmUnaryOp(s) => visitor.visit_asm_unary_op(stmt, s),
        StmtKind::AsmLoadConst(s) => visitor.visit_asm_load_const(stmt, s),
        StmtKind::AsmLoadSymbol(s) => visitor.visit_asm_load_symbol(stmt, s),
        StmtKind::AsmMemoryStore(s) => visitor.visit_asm_memory_store(stmt, s),
        StmtKind::AsmMemoryLoad(s) => visitor.visit_asm_memory_load(stmt, s),
    }
}

/// Run `visitor` over every statement of `ir` in insertion order.
///
/// Stops at the first error.
pub fn apply<V: Visitor + ?Sized>(visitor: &mut V, ir: &Ir) -> VisitResult {
    for stmt in ir {
        dispatch(visitor, stmt)?;
    }
    Ok(())
}

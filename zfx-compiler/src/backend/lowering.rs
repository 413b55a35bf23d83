//! Lowering of symbolic statements to register/memory form.
//!
//! The pass walks the input IR front to back and appends to a fresh output
//! IR. Every value lives in at most one place at a time: a register, a spill
//! slot, or (for symbols and literals not yet used) a pending load. The
//! output length doubles as the clock for LRU eviction.

use super::diagnostic::{Diagnostic, MissingLoadPolicy};
use super::regalloc::{MemoryPool, Pending, RegisterFile};
use super::LowerOptions;
use crate::ir::*;
use crate::CompileError;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Result of [`lower`](super::lower).
#[derive(Debug, Clone)]
pub struct Lowered {
    pub ir: Ir,
    /// For each statement of `ir`, the input statement that produced it.
    pub origins: Vec<StmtId>,
    pub diagnostics: Vec<Diagnostic>,
    /// High-water mark of the spill pool.
    pub memory_slots: usize,
}

/// How a statement refers to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// The statement reads the value.
    Use,
    /// The statement produces the value; nothing needs loading.
    Def,
}

pub(crate) struct LowerAccess {
    out: Ir,
    origins: Vec<StmtId>,
    regs: RegisterFile,
    memory: MemoryPool,
    loaders: HashMap<StmtId, Pending>,
    diagnostics: Vec<Diagnostic>,
    policy: MissingLoadPolicy,
    current: StmtId,
}

impl LowerAccess {
    pub(crate) fn new(input: &Ir, options: &LowerOptions) -> Self {
        Self {
            out: Ir::with_next_id(input.next_id()),
            origins: Vec::new(),
            regs: RegisterFile::new(options.registers),
            memory: MemoryPool::new(),
            loaders: HashMap::new(),
            diagnostics: Vec::new(),
            policy: options.missing_load,
            current: StmtId(0),
        }
    }

    pub(crate) fn run(mut self, input: &Ir) -> Result<Lowered, CompileError> {
        debug!(stmts = input.len(), registers = self.regs.len(), "lowering");
        apply(&mut self, input)?;
        debug!(
            emitted = self.out.len(),
            memory_slots = self.memory.len(),
            missing = self.diagnostics.len(),
            "lowered"
        );
        Ok(Lowered {
            ir: self.out,
            origins: self.origins,
            diagnostics: self.diagnostics,
            memory_slots: self.memory.len(),
        })
    }

    /// Logical timestamp: the number of statements emitted so far.
    fn now(&self) -> usize {
        self.out.len()
    }

    fn emit(&mut self, kind: impl Into<StmtKind>) {
        self.out.push(kind);
        self.origins.push(self.current);
    }

    /// A statement that reads its own result uses it before defining it.
    fn dst_access(stmt: &Stmt) -> Access {
        if stmt.kind.operands().contains(&stmt.id) {
            Access::Use
        } else {
            Access::Def
        }
    }

    /// Pick a register for a new value, spilling the LRU occupant if full.
    fn alloc_register(&mut self) -> RegId {
        if let Some(reg) = self.regs.first_free() {
            return reg;
        }
        // The register file is never empty (checked in `LowerOptions`).
        let victim = self.regs.lru_victim().unwrap_or(RegId(0));
        if let Some(id) = self.regs.get(victim).curr_stmtid {
            let mem = self.memory.temp_save(id);
            trace!(%id, %victim, %mem, "spill");
            self.emit(AsmMemoryStoreStmt { val: victim, mem });
        }
        victim
    }

    /// The register holding `id`, materialising it first if needed.
    fn lookup(&mut self, id: StmtId, access: Access) -> Result<RegId, CompileError> {
        if let Some(reg) = self.regs.find(id) {
            let now = self.now();
            self.regs.touch(reg, now);
            return Ok(reg);
        }

        let reg = self.alloc_register();

        if let Some(mem) = self.memory.take(id) {
            trace!(%id, %reg, %mem, "reload");
            self.emit(AsmMemoryLoadStmt { val: reg, mem });
        } else if let Some(pending) = self.loaders.remove(&id) {
            trace!(%id, %reg, name = %pending.name, "load");
            self.emit(pending.materialize(reg));
        } else if access == Access::Use {
            match self.policy {
                MissingLoadPolicy::Deny => {
                    return Err(CompileError::MissingDefinition { stmt: id, reg });
                }
                MissingLoadPolicy::Warn => {
                    warn!(%id, %reg, "missing load");
                    self.diagnostics.push(Diagnostic::MissingLoad {
                        stmt: id,
                        reg,
                        origin: self.current,
                    });
                }
            }
        }

        let now = self.now();
        self.regs.bind(reg, id, now);
        Ok(reg)
    }
}

impl Visitor for LowerAccess {
    fn visit_stmt(&mut self, stmt: &Stmt) -> VisitResult {
        self.current = stmt.id;
        self.out.push_clone(stmt);
        self.origins.push(stmt.id);
        Ok(())
    }

    fn visit_symbol(&mut self, stmt: &Stmt, sym: &SymbolStmt) -> VisitResult {
        self.loaders.insert(stmt.id, Pending::symbol(sym.name.as_str()));
        Ok(())
    }

    fn visit_literal(&mut self, stmt: &Stmt, lit: &LiteralStmt) -> VisitResult {
        self.loaders.insert(stmt.id, Pending::literal(lit.name.as_str()));
        Ok(())
    }

    fn visit_binary_op(&mut self, stmt: &Stmt, op: &BinaryOpStmt) -> VisitResult {
        self.current = stmt.id;
        let dst = self.lookup(stmt.id, Self::dst_access(stmt))?;
        let lhs = self.lookup(op.lhs, Access::Use)?;
        let rhs = self.lookup(op.rhs, Access::Use)?;
        self.emit(AsmBinaryOpStmt { op: op.op.clone(), dst, lhs, rhs });
        Ok(())
    }

    fn visit_unary_op(&mut self, stmt: &Stmt, op: &UnaryOpStmt) -> VisitResult {
        self.current = stmt.id;
        let dst = self.lookup(stmt.id, Self::dst_access(stmt))?;
        let src = self.lookup(op.src, Access::Use)?;
        self.emit(AsmUnaryOpStmt { op: op.op.clone(), dst, src });
        Ok(())
    }

    fn visit_assign(&mut self, stmt: &Stmt, assign: &AssignStmt) -> VisitResult {
        self.current = stmt.id;
        let dst = self.lookup(assign.dst, Access::Use)?;
        let src = self.lookup(assign.src, Access::Use)?;
        self.emit(AsmAssignStmt { dst, src });
        Ok(())
    }
}

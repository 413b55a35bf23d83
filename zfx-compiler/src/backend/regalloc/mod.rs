//! Register allocation bookkeeping.
//!
//! This module defines:
//! - [`RegisterFile`]: fixed-size register slots with LRU timestamps.
//! - [`MemoryPool`]: growable spill slots with first-fit reuse.
//! - [`Pending`]: deferred loads for symbols and literals.
//!
//! None of these emit instructions; the lowering pass drives them and turns
//! their decisions into assembly-level statements.

use crate::ir::{AsmLoadConstStmt, AsmLoadSymbolStmt, MemId, RegId, StmtId, StmtKind};
use std::collections::HashMap;

/// Default register file size.
pub const NUM_REGISTERS: usize = 32;

// ============================================================================
// Register file
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegInfo {
    /// Logical timestamp of the last reference.
    pub last_used: usize,
    /// Identity whose value currently lives here, `None` when free.
    pub curr_stmtid: Option<StmtId>,
}

#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: Vec<RegInfo>,
}

impl RegisterFile {
    pub fn new(size: usize) -> Self {
        Self { regs: vec![RegInfo::default(); size] }
    }

    pub fn len(&self) -> usize {
        self.regs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    pub fn get(&self, reg: RegId) -> RegInfo {
        self.regs[reg.0]
    }

    /// Register currently holding `id`, if any.
    pub fn find(&self, id: StmtId) -> Option<RegId> {
        self.regs
            .iter()
            .position(|r| r.curr_stmtid == Some(id))
            .map(RegId)
    }

    /// Lowest-indexed free register.
    pub fn first_free(&self) -> Option<RegId> {
        self.regs
            .iter()
            .position(|r| r.curr_stmtid.is_none())
            .map(RegId)
    }

    /// Least recently used register; ties go to the lowest index.
    pub fn lru_victim(&self) -> Option<RegId> {
        let mut victim: Option<usize> = None;
        for (i, r) in self.regs.iter().enumerate() {
            match victim {
                Some(v) if self.regs[v].last_used <= r.last_used => {}
                _ => victim = Some(i),
            }
        }
        victim.map(RegId)
    }

    /// Mark a register as referenced at `now`.
    pub fn touch(&mut self, reg: RegId, now: usize) {
        self.regs[reg.0].last_used = now;
    }

    /// Make `reg` hold `id`, replacing any prior occupant.
    pub fn bind(&mut self, reg: RegId, id: StmtId, now: usize) {
        self.regs[reg.0] = RegInfo { last_used: now, curr_stmtid: Some(id) };
    }

    /// Identities currently held, by register index.
    pub fn occupants(&self) -> impl Iterator<Item = (RegId, StmtId)> + '_ {
        self.regs
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.curr_stmtid.map(|id| (RegId(i), id)))
    }
}

// ============================================================================
// Spill memory
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryPool {
    slots: Vec<Option<StmtId>>,
    lut: HashMap<StmtId, MemId>,
}

impl MemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a slot for `id`: the first free one, or a new one at the end.
    pub fn temp_save(&mut self, id: StmtId) -> MemId {
        let mem = match self.slots.iter().position(Option::is_none) {
            Some(i) => {
                self.slots[i] = Some(id);
                MemId(i)
            }
            None => {
                self.slots.push(Some(id));
                MemId(self.slots.len() - 1)
            }
        };
        self.lut.insert(id, mem);
        mem
    }

    /// Release the slot holding `id`, returning it if `id` was spilled.
    pub fn take(&mut self, id: StmtId) -> Option<MemId> {
        let mem = self.lut.remove(&id)?;
        self.slots[mem.0] = None;
        Some(mem)
    }

    pub fn slot_of(&self, id: StmtId) -> Option<MemId> {
        self.lut.get(&id).copied()
    }

    /// Number of slots ever allocated (the pool never shrinks).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of identities currently spilled.
    pub fn in_use(&self) -> usize {
        self.lut.len()
    }
}

// ============================================================================
// Deferred loads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Symbol,
    Literal,
}

/// A load that has not happened yet; realised when the value is first used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub kind: LoadKind,
    pub name: String,
}

impl Pending {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self { kind: LoadKind::Symbol, name: name.into() }
    }

    pub fn literal(name: impl Into<String>) -> Self {
        Self { kind: LoadKind::Literal, name: name.into() }
    }

    /// The instruction that loads this value into `dst`.
    pub fn materialize(self, dst: RegId) -> StmtKind {
        match self.kind {
            LoadKind::Symbol => AsmLoadSymbolStmt { dst, name: self.name }.into(),
            LoadKind::Literal => AsmLoadConstStmt { dst, name: self.name }.into(),
        }
    }
}

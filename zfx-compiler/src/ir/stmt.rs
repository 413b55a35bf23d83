//! Statement kinds for the symbolic and assembly-level IR.
//!
//! Symbolic statements reference each other by [`StmtId`]; assembly-level
//! statements reference physical registers ([`RegId`]) and spill slots
//! ([`MemId`]) produced by the lowering pass.

use std::fmt;

// ============================================================================
// Handles
// ============================================================================

/// Stable identity of a statement, independent of its position in an [`Ir`].
///
/// [`Ir`]: super::Ir
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StmtId(pub usize);

/// Index into the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegId(pub usize);

/// Index into the spill memory pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemId(pub usize);

impl fmt::Display for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl fmt::Display for RegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl fmt::Display for MemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

// ============================================================================
// Symbolic statements
// ============================================================================

/// A named external value (attribute, uniform, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolStmt {
    pub name: String,
}

/// A constant, kept as its source spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralStmt {
    pub name: String,
}

/// `lhs <op> rhs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOpStmt {
    pub op: String,
    pub lhs: StmtId,
    pub rhs: StmtId,
}

/// `<op> src`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOpStmt {
    pub op: String,
    pub src: StmtId,
}

/// Copy the value of `src` into `dst`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignStmt {
    pub dst: StmtId,
    pub src: StmtId,
}

// ============================================================================
// Assembly-level statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmAssignStmt {
    pub dst: RegId,
    pub src: RegId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmBinaryOpStmt {
    pub op: String,
    pub dst: RegId,
    pub lhs: RegId,
    pub rhs: RegId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmUnaryOpStmt {
    pub op: String,
    pub dst: RegId,
    pub src: RegId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmLoadConstStmt {
    pub dst: RegId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmLoadSymbolStmt {
    pub dst: RegId,
    pub name: String,
}

/// Save register `val` into spill slot `mem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmMemoryStoreStmt {
    pub val: RegId,
    pub mem: MemId,
}

/// Reload spill slot `mem` into register `val`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmMemoryLoadStmt {
    pub val: RegId,
    pub mem: MemId,
}

// ============================================================================
// Statement
// ============================================================================

/// The closed set of statement kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    // ── Symbolic ────────────────────────────────────────────────────────
    Symbol(SymbolStmt),
    Literal(LiteralStmt),
    BinaryOp(BinaryOpStmt),
    UnaryOp(UnaryOpStmt),
    Assign(AssignStmt),

    // ── Assembly-level ──────────────────────────────────────────────────
    AsmAssign(AsmAssignStmt),
    AsmBinaryOp(AsmBinaryOpStmt),
    AsmUnaryOp(AsmUnaryOpStmt),
    AsmLoadConst(AsmLoadConstStmt),
    AsmLoadSymbol(AsmLoadSymbolStmt),
    AsmMemoryStore(AsmMemoryStoreStmt),
    AsmMemoryLoad(AsmMemoryLoadStmt),
}

impl StmtKind {
    /// Name of the concrete kind, as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Symbol(_) => "SymbolStmt",
            StmtKind::Literal(_) => "LiteralStmt",
            StmtKind::BinaryOp(_) => "BinaryOpStmt",
            StmtKind::UnaryOp(_) => "UnaryOpStmt",
            StmtKind::Assign(_) => "AssignStmt",
            StmtKind::AsmAssign(_) => "AsmAssignStmt",
            StmtKind::AsmBinaryOp(_) => "AsmBinaryOpStmt",
            StmtKind::AsmUnaryOp(_) => "AsmUnaryOpStmt",
            StmtKind::AsmLoadConst(_) => "AsmLoadConstStmt",
            StmtKind::AsmLoadSymbol(_) => "AsmLoadSymbolStmt",
            StmtKind::AsmMemoryStore(_) => "AsmMemoryStoreStmt",
            StmtKind::AsmMemoryLoad(_) => "AsmMemoryLoadStmt",
        }
    }

    /// Returns `true` for kinds the emitter can render.
    pub fn is_asm(&self) -> bool {
        !matches!(
            self,
            StmtKind::Symbol(_)
                | StmtKind::Literal(_)
                | StmtKind::BinaryOp(_)
                | StmtKind::UnaryOp(_)
                | StmtKind::Assign(_)
        )
    }

    /// Statement identities this statement reads.
    pub fn operands(&self) -> Vec<StmtId> {
        match self {
            StmtKind::BinaryOp(s) => vec![s.lhs, s.rhs],
            StmtKind::UnaryOp(s) => vec![s.src],
            StmtKind::Assign(s) => vec![s.dst, s.src],
            _ => Vec::new(),
        }
    }
}

macro_rules! impl_into_kind {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for StmtKind {
                fn from(stmt: $ty) -> Self {
                    StmtKind::$variant(stmt)
                }
            }
        )*
    };
}

impl_into_kind! {
    SymbolStmt => Symbol,
    LiteralStmt => Literal,
    BinaryOpStmt => BinaryOp,
    UnaryOpStmt => UnaryOp,
    AssignStmt => Assign,
    AsmAssignStmt => AsmAssign,
    AsmBinaryOpStmt => AsmBinaryOp,
    AsmUnaryOpStmt => AsmUnaryOp,
    AsmLoadConstStmt => AsmLoadConst,
    AsmLoadSymbolStmt => AsmLoadSymbol,
    AsmMemoryStoreStmt => AsmMemoryStore,
    AsmMemoryLoadStmt => AsmMemoryLoad,
}

/// A statement: an identity plus its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub id: StmtId,
    pub kind: StmtKind,
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ", self.id)?;
        match &self.kind {
            StmtKind::Symbol(s) => write!(f, "symbol {}", s.name),
            StmtKind::Literal(s) => write!(f, "const {}", s.name),
            StmtKind::BinaryOp(s) => write!(f, "{} {} {}", s.lhs, s.op, s.rhs),
            StmtKind::UnaryOp(s) => write!(f, "{} {}", s.op, s.src),
            StmtKind::Assign(s) => write!(f, "assign {} {}", s.dst, s.src),
            StmtKind::AsmAssign(s) => write!(f, "{} <- {}", s.dst, s.src),
            StmtKind::AsmBinaryOp(s) => write!(f, "{} <- {} {} {}", s.dst, s.lhs, s.op, s.rhs),
            StmtKind::AsmUnaryOp(s) => write!(f, "{} <- {} {}", s.dst, s.op, s.src),
            StmtKind::AsmLoadConst(s) => write!(f, "{} <- ldi {}", s.dst, s.name),
            StmtKind::AsmLoadSymbol(s) => write!(f, "{} <- lds {}", s.dst, s.name),
            StmtKind::AsmMemoryStore(s) => write!(f, "[{}] <- {}", s.mem, s.val),
            StmtKind::AsmMemoryLoad(s) => write!(f, "{} <- [{}]", s.val, s.mem),
        }
    }
}

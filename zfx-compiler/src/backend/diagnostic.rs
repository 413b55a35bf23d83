use crate::ir::{RegId, StmtId};
use std::fmt;

/// Non-fatal findings recorded while lowering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `stmt` was read but never defined, so `reg` was left uninitialised.
    /// `origin` is the input statement that read it.
    MissingLoad {
        stmt: StmtId,
        reg: RegId,
        origin: StmtId,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingLoad { stmt, reg, origin } => {
                write!(f, "missing load from {stmt} to {reg} (in {origin})")
            }
        }
    }
}

/// What the lowering pass does when a value has no definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingLoadPolicy {
    /// Record a [`Diagnostic::MissingLoad`] and keep going.
    #[default]
    Warn,
    /// Abort with [`CompileError::MissingDefinition`](crate::CompileError::MissingDefinition).
    Deny,
}

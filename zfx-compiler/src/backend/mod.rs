//! Backend: lowers symbolic IR to register form and prints it.
//!
//! Module layout:
//! - `regalloc`  : register file, spill pool and pending loads
//! - `lowering`  : the lowering pass (symbolic IR → assembly-level IR)
//! - `emitter`   : assembly-level IR → text
//! - `diagnostic`: non-fatal findings and the missing-load policy

mod diagnostic;
mod emitter;
mod lowering;
pub mod regalloc;

// Re-export the public API at `backend::` level.
pub use diagnostic::{Diagnostic, MissingLoadPolicy};
pub use emitter::{binary_opcode, unary_opcode, Assembly};
pub use lowering::Lowered;

use crate::ir::Ir;
use crate::CompileError;
use emitter::EmitAssembly;
use lowering::LowerAccess;
use regalloc::NUM_REGISTERS;

/// Lowering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowerOptions {
    /// Size of the register file.
    pub registers: usize,
    pub missing_load: MissingLoadPolicy,
}

impl Default for LowerOptions {
    fn default() -> Self {
        Self {
            registers: NUM_REGISTERS,
            missing_load: MissingLoadPolicy::Warn,
        }
    }
}

impl LowerOptions {
    pub fn with_registers(mut self, registers: usize) -> Self {
        self.registers = registers;
        self
    }

    pub fn with_missing_load(mut self, policy: MissingLoadPolicy) -> Self {
        self.missing_load = policy;
        self
    }

    pub fn validate(&self) -> Result<(), CompileError> {
        if self.registers == 0 {
            return Err(CompileError::InvalidOptions(
                "register file must have at least one register".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lower a symbolic IR into registers and spill slots.
///
/// `ir` is only read; the result is a new IR.
pub fn lower(ir: &Ir, options: &LowerOptions) -> Result<Lowered, CompileError> {
    options.validate()?;
    LowerAccess::new(ir, options).run(ir)
}

/// Render an assembly-level IR as text.
pub fn emit_assembly(ir: &Ir) -> Result<Assembly, CompileError> {
    EmitAssembly::new().run(ir)
}

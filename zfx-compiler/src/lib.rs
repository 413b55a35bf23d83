pub mod frontend;
pub mod ir;
pub mod backend;

use ir::{RegId, StmtId};
use thiserror::Error;

pub use backend::{emit_assembly, lower, Assembly, Diagnostic, LowerOptions, Lowered, MissingLoadPolicy};
pub use frontend::parse_ir;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] frontend::lexer::LexicalError),

    #[error("Parse error at line {line}, column {col}: {message}")]
    Parse {
        line: usize,
        col: usize,
        message: String,
    },

    #[error("invalid {arity} op `{op}` in {stmt}")]
    UnsupportedOperator {
        arity: OperatorArity,
        op: String,
        stmt: StmtId,
    },

    #[error("missing load from {stmt} to {reg}")]
    MissingDefinition { stmt: StmtId, reg: RegId },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorArity {
    Unary,
    Binary,
}

impl std::fmt::Display for OperatorArity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorArity::Unary => write!(f, "unary"),
            OperatorArity::Binary => write!(f, "binary"),
        }
    }
}

/// Everything a single compilation produces.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub ir: ir::Ir,
    pub lowered: Lowered,
    pub asm: Assembly,
}

/// Parse, lower and emit in one go, keeping every intermediate result.
pub fn compile(source: &str, options: &LowerOptions) -> Result<Compilation, CompileError> {
    let ir = parse_ir(source)?;
    let lowered = lower(&ir, options)?;
    let asm = emit_assembly(&lowered.ir)?;
    Ok(Compilation { ir, lowered, asm })
}

/// Compile textual symbolic IR directly to assembly text.
pub fn compile_to_asm(source: &str, options: &LowerOptions) -> Result<String, CompileError> {
    Ok(compile(source, options)?.asm.to_text())
}

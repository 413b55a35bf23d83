use serde::Serialize;
use zfx_compiler::{compile, LowerOptions};

// ── Snapshot (JSON output) ───────────────────────────────────────────

/// Complete compilation result printed by `--json`.
#[derive(Serialize, Clone, Debug)]
pub struct Snapshot {
    pub success: bool,
    pub error: Option<String>,
    pub ir: Option<Vec<String>>,
    pub lowered: Option<Vec<String>>,
    /// Per-lowered-statement identity of the symbolic statement behind it.
    pub lowered_origins: Option<Vec<usize>>,
    pub asm: Option<Vec<String>>,
    pub diagnostics: Vec<String>,
    pub memory_slots: usize,
}

impl Snapshot {
    pub fn error(msg: String) -> Self {
        Self {
            success: false,
            error: Some(msg),
            ir: None,
            lowered: None,
            lowered_origins: None,
            asm: None,
            diagnostics: Vec::new(),
            memory_slots: 0,
        }
    }

    pub fn compile(source: &str, options: &LowerOptions) -> Self {
        let out = match compile(source, options) {
            Ok(out) => out,
            Err(e) => return Snapshot::error(e.to_string()),
        };

        Self {
            success: !out.asm.has_errors(),
            error: None,
            ir: Some(out.ir.to_lines()),
            lowered: Some(out.lowered.ir.to_lines()),
            lowered_origins: Some(out.lowered.origins.iter().map(|id| id.0).collect()),
            asm: Some(out.asm.lines.clone()),
            diagnostics: out.lowered.diagnostics.iter().map(|d| d.to_string()).collect(),
            memory_slots: out.lowered.memory_slots,
        }
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use zfx_compiler::backend::regalloc::NUM_REGISTERS;
use zfx_compiler::{compile, LowerOptions, MissingLoadPolicy};

mod snapshot;

use snapshot::Snapshot;

#[derive(Parser)]
#[command(name = "zfx")]
#[command(about = "Lower symbolic IR to register-allocated assembly")]
struct Args {
    /// Path to a symbolic IR file (`.zir`)
    file: Option<PathBuf>,

    /// Print the symbolic IR as read. If none of --ir/--lowered/--asm/--all is given, defaults to --asm.
    #[arg(long)]
    ir: bool,

    /// Print the lowered (register-allocated) IR
    #[arg(long)]
    lowered: bool,

    /// Print the assembly text
    #[arg(long)]
    asm: bool,

    /// Print every stage
    #[arg(long)]
    all: bool,

    /// Size of the register file
    #[arg(long, default_value_t = NUM_REGISTERS)]
    registers: usize,

    /// Fail on values that are used without being defined
    #[arg(long)]
    strict: bool,

    /// Print a JSON snapshot of every stage instead of text
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns `Ok(false)` when compilation ran but did not succeed.
fn run(args: &Args) -> Result<bool> {
    let src = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading '{}'", path.display()))?,
        None => DEFAULT_SAMPLE.trim().to_string(),
    };

    let policy = if args.strict {
        MissingLoadPolicy::Deny
    } else {
        MissingLoadPolicy::Warn
    };
    let options = LowerOptions::default()
        .with_registers(args.registers)
        .with_missing_load(policy);

    if args.json {
        let snap = Snapshot::compile(&src, &options);
        println!("{}", serde_json::to_string_pretty(&snap)?);
        return Ok(snap.success);
    }

    // Determine outputs
    let mut want_ir = args.ir;
    let mut want_lowered = args.lowered;
    let mut want_asm = args.asm;
    if args.all {
        want_ir = true;
        want_lowered = true;
        want_asm = true;
    }
    if !want_ir && !want_lowered && !want_asm {
        want_asm = true;
    } // default to assembly

    let out = compile(&src, &options).context("compilation failed")?;

    if want_ir {
        for line in out.ir.to_lines() {
            println!("{}", line);
        }
        println!();
    }

    if want_lowered {
        for (line, origin) in out.lowered.ir.to_lines().iter().zip(&out.lowered.origins) {
            println!("{:<32} ; from {}", line, origin);
        }
        println!();
    }

    if want_asm {
        print!("{}", out.asm.to_text());
    }

    for diag in &out.lowered.diagnostics {
        eprintln!("warning: {}", diag);
    }
    for line in out.asm.errors() {
        eprintln!("error: {}", line);
    }

    Ok(!out.asm.has_errors())
}

const DEFAULT_SAMPLE: &str = r#"
# @pos = @pos + @vel * dt
$0 = symbol @pos
$1 = symbol @vel
$2 = symbol dt
$3 = $1 * $2
$4 = $0 + $3
$5 = assign $0 $4
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_default_matches_library() {
        let args = Args::try_parse_from(["zfx"]).expect("no flags are required");
        assert_eq!(args.registers, LowerOptions::default().registers);
        assert!(!args.strict);
    }

    #[test]
    fn json_snapshot_reports_every_stage() {
        let snap = Snapshot::compile(DEFAULT_SAMPLE.trim(), &LowerOptions::default());
        assert!(snap.success);
        assert_eq!(snap.lowered.as_ref().map(Vec::len), snap.lowered_origins.as_ref().map(Vec::len));

        let json = serde_json::to_value(&snap).expect("snapshot serializes");
        assert_eq!(json["success"], true);
        assert_eq!(json["asm"][2], "mul 0 1 2");
        assert_eq!(json["memory_slots"], 0);
    }

    #[test]
    fn json_snapshot_carries_the_error() {
        let strict = LowerOptions::default().with_missing_load(MissingLoadPolicy::Deny);
        let snap = Snapshot::compile("$0 = $0 + $0", &strict);
        assert!(!snap.success);
        assert!(snap.asm.is_none());
        assert_eq!(snap.error.as_deref(), Some("missing load from $0 to r0"));
    }
}

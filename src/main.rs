use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Two-pass assembler for a restricted RV32I dialect.
///
/// Reads an assembly source file and writes one 32-bit binary word string
/// per source line. The source must end with the terminator instruction
/// `beq zero,zero,0`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Input assembly source file.
    input: PathBuf,
    /// Output listing file (one 32-character binary line per instruction).
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let program = rv32asm::assemble(&source)?;

    fs::write(&cli.output, program.to_text())
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    Ok(())
}

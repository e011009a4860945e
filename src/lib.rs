//! # rv32asm — two-pass RV32I subset assembler
//!
//! `rv32asm` translates a restricted RISC-V assembly text dialect into a
//! listing of 32-bit binary machine-word strings, one per source line, with
//! intra-file label resolution for branch and jump targets.
//!
//! ## Quick Start
//!
//! ```rust
//! let program = rv32asm::assemble("add x5,x6,x7\nbeq zero,zero,0").unwrap();
//! assert_eq!(program.words(), &[0x007302B3, 0x00000063]);
//! ```
//!
//! ## Dialect
//!
//! - Formats R/I/S/B/J of the base integer set; no pseudo-instructions,
//!   directives, or floating point.
//! - Each physical line is `label: mnemonic operands` or `mnemonic operands`
//!   and occupies one 4-byte address slot.
//! - The final line must be the sentinel `beq zero,zero,0`, which traps
//!   execution in a self-loop instead of running off the end of the program.

#![forbid(unsafe_code)]
// An assembler intentionally performs narrowing / sign-changing casts between
// integer widths when packing immediates into bit fields.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::match_same_arms,
    clippy::unreadable_literal,
    clippy::uninlined_format_args
)]

/// Two-pass driver producing a [`Program`].
pub mod assembler;
/// Per-format bit packers and immediate validation.
pub mod encoder;
/// Error taxonomy with 1-indexed line diagnostics.
pub mod error;
/// Registers, mnemonics, and the format-tagged instruction type.
pub mod ir;
/// First-pass label resolution and the terminator invariant.
pub mod labels;
/// Line parsing: label prefixes, mnemonics, operand text.
pub mod parser;

// Re-exports
pub use assembler::{assemble, Program};
pub use error::AsmError;
pub use ir::{Format, Instruction, Mnemonic, Register, Target};
pub use labels::{LabelTable, TERMINATOR};

/// Assemble source text straight to the output listing: one 32-character
/// binary line per source line, each newline-terminated.
///
/// # Errors
///
/// Returns [`AsmError`] if the input is missing its terminator line or any
/// line fails to parse, validate, or encode.
///
/// # Examples
///
/// ```rust
/// let text = rv32asm::assemble_to_text("beq zero,zero,0").unwrap();
/// assert_eq!(text, "00000000000000000000000001100011\n");
/// ```
pub fn assemble_to_text(source: &str) -> Result<String, AsmError> {
    Ok(assemble(source)?.to_text())
}

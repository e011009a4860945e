//! Line parser: label prefixes, mnemonics, and operand text.
//!
//! Each physical line is either `label: mnemonic operands` or
//! `mnemonic operands`. Operands are comma-separated; `LW` and `SW` use the
//! memory shape `offset(reg)` for their second operand. Mnemonics are
//! case-normalized to upper case before dispatch; register names are not.

use crate::error::AsmError;
use crate::ir::{Format, Instruction, Mnemonic, Register, Target};

/// Is `name` a bare label identifier?
///
/// Labels are alphanumeric/underscore, non-empty, and must not start with a
/// digit — so a purely numeric branch operand is always read as a literal
/// displacement, never as a label reference.
fn is_label_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split an optional `label:` prefix off a source line.
///
/// A line containing `:` yields the text right of the first `:` as the
/// instruction text; the left-hand side is returned as a label only when its
/// trimmed form is a bare identifier (this guards against ever treating an
/// operand's `:` as a definition — the dialect has none).
#[must_use]
pub fn split_label(line: &str) -> (Option<&str>, &str) {
    match line.split_once(':') {
        Some((left, rest)) => {
            let name = left.trim();
            if is_label_ident(name) {
                (Some(name), rest)
            } else {
                (None, rest)
            }
        }
        None => (None, line),
    }
}

/// Parse the instruction text of one line (label prefix already removed)
/// into a format-tagged [`Instruction`].
///
/// # Errors
///
/// `UnsupportedOpcode` for a mnemonic outside the dialect,
/// `UnknownRegister` for a register operand that fails to resolve, and
/// `MalformedOperands` for wrong arity or shape.
pub fn parse_instruction(text: &str, line: u32) -> Result<Instruction, AsmError> {
    let text = text.trim();
    let (raw_mnemonic, operand_text) = match text.split_once(char::is_whitespace) {
        Some((m, rest)) => (m, rest.trim_start()),
        None => (text, ""),
    };
    if raw_mnemonic.is_empty() {
        return Err(AsmError::MalformedOperands {
            detail: String::from("missing mnemonic"),
            line,
        });
    }

    let mnemonic = Mnemonic::from_name(&raw_mnemonic.to_ascii_uppercase()).ok_or_else(|| {
        AsmError::UnsupportedOpcode {
            mnemonic: raw_mnemonic.to_string(),
            line,
        }
    })?;

    let operands: Vec<&str> = operand_text.split(',').map(str::trim).collect();

    match mnemonic.format() {
        Format::R => {
            expect_arity(&operands, 3, line)?;
            Ok(Instruction::R {
                mnemonic,
                rd: reg(operands[0], line)?,
                rs1: reg(operands[1], line)?,
                rs2: reg(operands[2], line)?,
            })
        }
        Format::I if mnemonic == Mnemonic::Lw => {
            // LW takes `rd, offset(rs1)` rather than `rd, rs1, imm`.
            expect_arity(&operands, 2, line)?;
            let (imm, rs1) = mem_operand(operands[1], line)?;
            Ok(Instruction::I {
                mnemonic,
                rd: reg(operands[0], line)?,
                rs1,
                imm,
            })
        }
        Format::I => {
            expect_arity(&operands, 3, line)?;
            Ok(Instruction::I {
                mnemonic,
                rd: reg(operands[0], line)?,
                rs1: reg(operands[1], line)?,
                imm: literal(operands[2], line)?,
            })
        }
        Format::S => {
            expect_arity(&operands, 2, line)?;
            let (imm, rs1) = mem_operand(operands[1], line)?;
            Ok(Instruction::S {
                mnemonic,
                rs2: reg(operands[0], line)?,
                rs1,
                imm,
            })
        }
        Format::B => {
            expect_arity(&operands, 3, line)?;
            Ok(Instruction::B {
                mnemonic,
                rs1: reg(operands[0], line)?,
                rs2: reg(operands[1], line)?,
                target: target(operands[2], line)?,
            })
        }
        Format::J => {
            expect_arity(&operands, 2, line)?;
            Ok(Instruction::J {
                mnemonic,
                rd: reg(operands[0], line)?,
                target: target(operands[1], line)?,
            })
        }
    }
}

fn expect_arity(operands: &[&str], want: usize, line: u32) -> Result<(), AsmError> {
    // A bare mnemonic splits into one empty operand, not zero.
    let found = if operands.len() == 1 && operands[0].is_empty() {
        0
    } else {
        operands.len()
    };
    if found == want {
        Ok(())
    } else {
        Err(AsmError::MalformedOperands {
            detail: format!("expected {} operands, found {}", want, found),
            line,
        })
    }
}

fn reg(name: &str, line: u32) -> Result<Register, AsmError> {
    Register::from_name(name).ok_or_else(|| AsmError::UnknownRegister {
        name: name.to_string(),
        line,
    })
}

fn literal(text: &str, line: u32) -> Result<i64, AsmError> {
    text.parse::<i64>().map_err(|_| AsmError::MalformedOperands {
        detail: format!("expected integer immediate, found '{}'", text),
        line,
    })
}

/// Parse the memory shape `offset(reg)` used by `LW` and `SW`.
fn mem_operand(text: &str, line: u32) -> Result<(i64, Register), AsmError> {
    let malformed = || AsmError::MalformedOperands {
        detail: format!("expected offset(reg), found '{}'", text),
        line,
    };
    let (offset, rest) = text.split_once('(').ok_or_else(malformed)?;
    let base = rest.strip_suffix(')').ok_or_else(malformed)?;
    let imm = offset.trim().parse::<i64>().map_err(|_| malformed())?;
    Ok((imm, reg(base.trim(), line)?))
}

/// Parse a branch/jump target: an integer literal is a byte displacement,
/// anything else is a label reference resolved in pass 2.
fn target(text: &str, line: u32) -> Result<Target, AsmError> {
    if let Ok(value) = text.parse::<i64>() {
        return Ok(Target::Immediate(value));
    }
    if is_label_ident(text) {
        Ok(Target::Label(text.to_string()))
    } else {
        Err(AsmError::MalformedOperands {
            detail: format!("expected displacement or label, found '{}'", text),
            line,
        })
    }
}

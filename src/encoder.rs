//! Per-format instruction encoders.
//!
//! Field layouts, MSB first:
//!
//! ```text
//! R-type:  [funct7 | rs2 | rs1 | funct3 | rd  | opcode]
//! I-type:  [  imm[11:0]  | rs1 | funct3 | rd  | opcode]
//! S-type:  [imm[11:5]|rs2| rs1 | funct3 |imm[4:0]|opcode]
//! B-type:  [imm[12|10:5]|rs2|rs1|funct3|imm[4:1|11]|opcode]
//! J-type:  [imm[20|10:1|11|19:12]        | rd  | opcode]
//! ```
//!
//! B and J store pc-relative byte displacements with bit 0 implied zero; the
//! B-type immediate is therefore a count of 2-byte units. Negative values are
//! packed as fixed-width two's complement: for a `w`-bit field, `v < 0` is
//! stored as `(2^w + v) mod 2^w`, and positive values are masked to `w` bits.

use crate::error::AsmError;
use crate::ir::{Instruction, Target};
use crate::labels::LabelTable;

// ── Field packers ───────────────────────────────────────────────────────

/// Encode an R-type instruction.
#[inline]
fn r_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    (funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Encode an I-type instruction.
#[inline]
fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    let imm = (imm as u32) & 0xFFF;
    (imm << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Encode an S-type instruction.
#[inline]
fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    let imm_hi = (imm >> 5) & 0x7F;
    let imm_lo = imm & 0x1F;
    (imm_hi << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (imm_lo << 7) | opcode
}

/// Encode a B-type instruction. `imm` is the byte displacement.
#[inline]
fn b_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    let bit12 = (imm >> 12) & 1;
    let bit11 = (imm >> 11) & 1;
    let bits10_5 = (imm >> 5) & 0x3F;
    let bits4_1 = (imm >> 1) & 0xF;
    (bit12 << 31)
        | (bits10_5 << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (funct3 << 12)
        | (bits4_1 << 8)
        | (bit11 << 7)
        | opcode
}

/// Encode a J-type instruction. `imm` is the byte displacement.
#[inline]
fn j_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    let bit20 = (imm >> 20) & 1;
    let bits10_1 = (imm >> 1) & 0x3FF;
    let bit11 = (imm >> 11) & 1;
    let bits19_12 = (imm >> 12) & 0xFF;
    (bit20 << 31) | (bits10_1 << 21) | (bit11 << 20) | (bits19_12 << 12) | (rd << 7) | opcode
}

// ── Validation ──────────────────────────────────────────────────────────

/// The dialect's historical bound on literal immediates: the encoded value
/// may not be more negative than the current program counter. This is not an
/// architectural field-width check; over-wide values are silently masked.
fn check_literal(value: i64, address: u32, line: u32) -> Result<(), AsmError> {
    if value < -i64::from(address) {
        return Err(AsmError::InvalidImmediate { value, line });
    }
    Ok(())
}

/// Branch displacements are stored as 2-byte units; an odd byte displacement
/// has no encoding.
fn check_even(value: i64, line: u32) -> Result<(), AsmError> {
    if value % 2 != 0 {
        return Err(AsmError::InvalidImmediate { value, line });
    }
    Ok(())
}

/// Resolve a branch/jump target to a byte displacement from `address`.
///
/// Literals are taken as written (and subjected to the historical bound);
/// labels become `labelAddress - currentAddress`.
fn displacement(
    target: &Target,
    address: u32,
    labels: &LabelTable,
    line: u32,
) -> Result<i64, AsmError> {
    match target {
        Target::Immediate(value) => {
            check_literal(*value, address, line)?;
            Ok(*value)
        }
        Target::Label(name) => match labels.get(name) {
            Some(label_address) => Ok(i64::from(label_address) - i64::from(address)),
            None => Err(AsmError::UndefinedLabel {
                label: name.clone(),
                line,
            }),
        },
    }
}

/// Encode one parsed instruction at byte address `address`, resolving label
/// targets through the pass-1 `labels` table.
///
/// # Errors
///
/// `InvalidImmediate` for a literal below `-address` or an odd branch
/// displacement; `UndefinedLabel` for an unresolved B/J target.
pub fn encode(
    instr: &Instruction,
    address: u32,
    labels: &LabelTable,
    line: u32,
) -> Result<u32, AsmError> {
    match instr {
        Instruction::R {
            mnemonic,
            rd,
            rs1,
            rs2,
        } => Ok(r_type(
            mnemonic.opcode(),
            rd.number(),
            mnemonic.funct3(),
            rs1.number(),
            rs2.number(),
            mnemonic.funct7(),
        )),
        Instruction::I {
            mnemonic,
            rd,
            rs1,
            imm,
        } => {
            check_literal(*imm, address, line)?;
            Ok(i_type(
                mnemonic.opcode(),
                rd.number(),
                mnemonic.funct3(),
                rs1.number(),
                *imm as i32,
            ))
        }
        Instruction::S {
            mnemonic,
            rs2,
            rs1,
            imm,
        } => {
            check_literal(*imm, address, line)?;
            Ok(s_type(
                mnemonic.opcode(),
                mnemonic.funct3(),
                rs1.number(),
                rs2.number(),
                *imm as i32,
            ))
        }
        Instruction::B {
            mnemonic,
            rs1,
            rs2,
            target,
        } => {
            let disp = displacement(target, address, labels, line)?;
            check_even(disp, line)?;
            Ok(b_type(
                mnemonic.opcode(),
                mnemonic.funct3(),
                rs1.number(),
                rs2.number(),
                disp as i32,
            ))
        }
        Instruction::J {
            mnemonic,
            rd,
            target,
        } => {
            let disp = displacement(target, address, labels, line)?;
            Ok(j_type(mnemonic.opcode(), rd.number(), disp as i32))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_instruction;

    fn encode_at(text: &str, address: u32) -> Result<u32, AsmError> {
        let labels = LabelTable::default();
        let instr = parse_instruction(text, address / 4 + 1)?;
        encode(&instr, address, &labels, address / 4 + 1)
    }

    #[test]
    fn r_type_add() {
        assert_eq!(encode_at("add x5,x6,x7", 0).unwrap(), 0x0073_02B3);
    }

    #[test]
    fn r_type_sub_sets_funct7() {
        assert_eq!(encode_at("sub x1,x2,x3", 0).unwrap(), 0x4031_01B3);
    }

    #[test]
    fn i_type_addi() {
        assert_eq!(encode_at("addi x1,x2,5", 0).unwrap(), 0x0051_0093);
    }

    #[test]
    fn i_type_negative_immediate() {
        // addr 8 admits immediates down to -8
        assert_eq!(encode_at("addi x1,x2,-1", 8).unwrap(), 0xFFF1_0093);
    }

    #[test]
    fn i_type_lw() {
        assert_eq!(encode_at("lw x5, 8(x2)", 0).unwrap(), 0x0081_2283);
    }

    #[test]
    fn s_type_sw() {
        assert_eq!(encode_at("sw x5, 12(x2)", 0).unwrap(), 0x0051_2623);
    }

    #[test]
    fn b_type_zero_displacement() {
        assert_eq!(encode_at("beq x1,x2,0", 0).unwrap(), 0x0020_8063);
    }

    #[test]
    fn b_type_backward_label() {
        let labels =
            LabelTable::scan("loop: add x1,x1,x2\nadd x2,x2,x3\nbeq x1,x2,loop\nbeq zero,zero,0")
                .unwrap();
        let instr = parse_instruction("beq x1,x2,loop", 3).unwrap();
        // disp = 0 - 8 = -8
        assert_eq!(encode(&instr, 8, &labels, 3).unwrap(), 0xFE20_8CE3);
    }

    #[test]
    fn j_type_backward_label() {
        let labels = LabelTable::scan("top: add x1,x1,x2\nadd x2,x2,x3\nbeq zero,zero,0").unwrap();
        let instr = parse_instruction("jal x1,top", 3).unwrap();
        // disp = 0 - 8 = -8
        assert_eq!(encode(&instr, 8, &labels, 3).unwrap(), 0xFF9F_F0EF);
    }

    #[test]
    fn sentinel_encodes_to_branch_self() {
        assert_eq!(encode_at("beq zero,zero,0", 0).unwrap(), 0x0000_0063);
    }

    #[test]
    fn literal_below_negative_address_is_invalid() {
        // At address 0 no negative immediate is admissible.
        let err = encode_at("addi x1,x2,-1", 0).unwrap_err();
        assert_eq!(err, AsmError::InvalidImmediate { value: -1, line: 1 });
    }

    #[test]
    fn odd_branch_displacement_is_invalid() {
        let err = encode_at("beq x1,x2,3", 0).unwrap_err();
        assert_eq!(err, AsmError::InvalidImmediate { value: 3, line: 1 });
    }

    #[test]
    fn undefined_label_reported_with_line() {
        let labels = LabelTable::default();
        let instr = parse_instruction("jal x1,nowhere", 2).unwrap();
        let err = encode(&instr, 4, &labels, 2).unwrap_err();
        assert_eq!(
            err,
            AsmError::UndefinedLabel {
                label: "nowhere".into(),
                line: 2
            }
        );
    }

    #[test]
    fn twos_complement_masking() {
        // -1 in a 12-bit field is 0xFFF.
        let word = encode_at("addi x0,x0,-1", 4).unwrap();
        assert_eq!(word >> 20, 0xFFF);
        // -2048 is the most negative 12-bit value: 0x800.
        let word = encode_at("addi x0,x0,-2048", 2048).unwrap();
        assert_eq!(word >> 20, 0x800);
    }
}

//! Intermediate representation: registers, mnemonics, and format-tagged
//! instructions.
//!
//! The dialect covers the five fixed 32-bit layouts of the RISC-V base
//! integer set:
//!
//! ```text
//! R-type:  [funct7 | rs2 | rs1 | funct3 | rd  | opcode]
//! I-type:  [  imm[11:0]  | rs1 | funct3 | rd  | opcode]
//! S-type:  [imm[11:5]|rs2| rs1 | funct3 |imm[4:0]|opcode]
//! B-type:  [imm[12|10:5]|rs2|rs1|funct3|imm[4:1|11]|opcode]
//! J-type:  [imm[20|10:1|11|19:12]        | rd  | opcode]
//! ```

// ── Opcodes ─────────────────────────────────────────────────────────────

const OP_REG: u32 = 0b011_0011;
const OP_IMM: u32 = 0b001_0011;
const OP_LOAD: u32 = 0b000_0011;
const OP_JALR: u32 = 0b110_0111;
const OP_STORE: u32 = 0b010_0011;
const OP_BRANCH: u32 = 0b110_0011;
const OP_JAL: u32 = 0b110_1111;

// ── funct7 values ───────────────────────────────────────────────────────

const F7_BASE: u32 = 0b000_0000;
const F7_ALT: u32 = 0b010_0000;

/// One of the 32 RV32I integer registers, held as its 5-bit encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Register(u8);

impl Register {
    /// Resolve a register name to its 5-bit encoding.
    ///
    /// Supports both hardware names (`x0`–`x31`) and ABI names (`zero`, `ra`,
    /// `sp`, `gp`, `tp`, `t0`–`t6`, `s0`–`s11`, `a0`–`a7`, `fp`). Several ABI
    /// names collide on the same encoding (`fp` is an alias for `s0`).
    /// Matching is exact; no case normalization is applied.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Register> {
        let num = match name {
            // Hardware names
            "x0" => 0,
            "x1" => 1,
            "x2" => 2,
            "x3" => 3,
            "x4" => 4,
            "x5" => 5,
            "x6" => 6,
            "x7" => 7,
            "x8" => 8,
            "x9" => 9,
            "x10" => 10,
            "x11" => 11,
            "x12" => 12,
            "x13" => 13,
            "x14" => 14,
            "x15" => 15,
            "x16" => 16,
            "x17" => 17,
            "x18" => 18,
            "x19" => 19,
            "x20" => 20,
            "x21" => 21,
            "x22" => 22,
            "x23" => 23,
            "x24" => 24,
            "x25" => 25,
            "x26" => 26,
            "x27" => 27,
            "x28" => 28,
            "x29" => 29,
            "x30" => 30,
            "x31" => 31,
            // ABI names
            "zero" => 0,
            "ra" => 1,
            "sp" => 2,
            "gp" => 3,
            "tp" => 4,
            "t0" => 5,
            "t1" => 6,
            "t2" => 7,
            "s0" => 8,
            "fp" => 8, // fp is an alias for s0
            "s1" => 9,
            "a0" => 10,
            "a1" => 11,
            "a2" => 12,
            "a3" => 13,
            "a4" => 14,
            "a5" => 15,
            "a6" => 16,
            "a7" => 17,
            "s2" => 18,
            "s3" => 19,
            "s4" => 20,
            "s5" => 21,
            "s6" => 22,
            "s7" => 23,
            "s8" => 24,
            "s9" => 25,
            "s10" => 26,
            "s11" => 27,
            "t3" => 28,
            "t4" => 29,
            "t5" => 30,
            "t6" => 31,
            _ => return None,
        };
        Some(Register(num))
    }

    /// The 5-bit register number.
    #[must_use]
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }
}

/// Instruction format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    R,
    I,
    S,
    B,
    J,
}

/// The mnemonic set of the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mnemonic {
    Add,
    Sub,
    And,
    Or,
    Srl,
    Slt,
    Addi,
    Lw,
    Jalr,
    Sw,
    Beq,
    Bne,
    Jal,
}

impl Mnemonic {
    /// Look up a case-normalized (upper case) mnemonic.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Mnemonic> {
        match name {
            "ADD" => Some(Mnemonic::Add),
            "SUB" => Some(Mnemonic::Sub),
            "AND" => Some(Mnemonic::And),
            "OR" => Some(Mnemonic::Or),
            "SRL" => Some(Mnemonic::Srl),
            "SLT" => Some(Mnemonic::Slt),
            "ADDI" => Some(Mnemonic::Addi),
            "LW" => Some(Mnemonic::Lw),
            "JALR" => Some(Mnemonic::Jalr),
            "SW" => Some(Mnemonic::Sw),
            "BEQ" => Some(Mnemonic::Beq),
            "BNE" => Some(Mnemonic::Bne),
            "JAL" => Some(Mnemonic::Jal),
            _ => None,
        }
    }

    /// The format this mnemonic encodes to.
    #[must_use]
    pub fn format(self) -> Format {
        match self {
            Mnemonic::Add
            | Mnemonic::Sub
            | Mnemonic::And
            | Mnemonic::Or
            | Mnemonic::Srl
            | Mnemonic::Slt => Format::R,
            Mnemonic::Addi | Mnemonic::Lw | Mnemonic::Jalr => Format::I,
            Mnemonic::Sw => Format::S,
            Mnemonic::Beq | Mnemonic::Bne => Format::B,
            Mnemonic::Jal => Format::J,
        }
    }

    /// The 7-bit major opcode.
    #[must_use]
    pub fn opcode(self) -> u32 {
        match self {
            Mnemonic::Add
            | Mnemonic::Sub
            | Mnemonic::And
            | Mnemonic::Or
            | Mnemonic::Srl
            | Mnemonic::Slt => OP_REG,
            Mnemonic::Addi => OP_IMM,
            Mnemonic::Lw => OP_LOAD,
            Mnemonic::Jalr => OP_JALR,
            Mnemonic::Sw => OP_STORE,
            Mnemonic::Beq | Mnemonic::Bne => OP_BRANCH,
            Mnemonic::Jal => OP_JAL,
        }
    }

    /// The funct3 field. J-format has none; `Jal` yields 0 and the J-type
    /// packer never reads it.
    #[must_use]
    pub fn funct3(self) -> u32 {
        match self {
            Mnemonic::Add | Mnemonic::Sub | Mnemonic::Addi | Mnemonic::Jalr | Mnemonic::Beq => {
                0b000
            }
            Mnemonic::Bne => 0b001,
            Mnemonic::Slt => 0b010,
            Mnemonic::Lw | Mnemonic::Sw => 0b010,
            Mnemonic::Srl => 0b101,
            Mnemonic::Or => 0b110,
            Mnemonic::And => 0b111,
            Mnemonic::Jal => 0b000,
        }
    }

    /// The funct7 field. Meaningful for R-format only.
    #[must_use]
    pub fn funct7(self) -> u32 {
        match self {
            Mnemonic::Sub => F7_ALT,
            _ => F7_BASE,
        }
    }
}

/// A branch/jump target: a literal byte displacement or a label reference
/// resolved against the pass-1 table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Immediate(i64),
    Label(String),
}

/// A parsed instruction, tagged by format. Each variant carries only the
/// fields valid for that format.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instruction {
    R {
        mnemonic: Mnemonic,
        rd: Register,
        rs1: Register,
        rs2: Register,
    },
    I {
        mnemonic: Mnemonic,
        rd: Register,
        rs1: Register,
        imm: i64,
    },
    S {
        mnemonic: Mnemonic,
        rs2: Register,
        rs1: Register,
        imm: i64,
    },
    B {
        mnemonic: Mnemonic,
        rs1: Register,
        rs2: Register,
        target: Target,
    },
    J {
        mnemonic: Mnemonic,
        rd: Register,
        target: Target,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_names_resolve() {
        assert_eq!(Register::from_name("x0").unwrap().number(), 0);
        assert_eq!(Register::from_name("x15").unwrap().number(), 15);
        assert_eq!(Register::from_name("x31").unwrap().number(), 31);
    }

    #[test]
    fn abi_names_resolve() {
        assert_eq!(Register::from_name("zero").unwrap().number(), 0);
        assert_eq!(Register::from_name("ra").unwrap().number(), 1);
        assert_eq!(Register::from_name("sp").unwrap().number(), 2);
        assert_eq!(Register::from_name("a0").unwrap().number(), 10);
        assert_eq!(Register::from_name("t6").unwrap().number(), 31);
    }

    #[test]
    fn fp_aliases_s0() {
        assert_eq!(
            Register::from_name("fp").unwrap(),
            Register::from_name("s0").unwrap()
        );
        assert_eq!(Register::from_name("fp").unwrap().number(), 8);
    }

    #[test]
    fn unknown_names_rejected() {
        assert_eq!(Register::from_name("x32"), None);
        assert_eq!(Register::from_name("X5"), None); // exact match only
        assert_eq!(Register::from_name("r1"), None);
        assert_eq!(Register::from_name(""), None);
    }

    #[test]
    fn mnemonic_lookup_is_upper_case() {
        assert_eq!(Mnemonic::from_name("ADD"), Some(Mnemonic::Add));
        assert_eq!(Mnemonic::from_name("add"), None);
        assert_eq!(Mnemonic::from_name("MUL"), None);
    }

    #[test]
    fn formats() {
        assert_eq!(Mnemonic::Add.format(), Format::R);
        assert_eq!(Mnemonic::Addi.format(), Format::I);
        assert_eq!(Mnemonic::Lw.format(), Format::I);
        assert_eq!(Mnemonic::Jalr.format(), Format::I);
        assert_eq!(Mnemonic::Sw.format(), Format::S);
        assert_eq!(Mnemonic::Beq.format(), Format::B);
        assert_eq!(Mnemonic::Bne.format(), Format::B);
        assert_eq!(Mnemonic::Jal.format(), Format::J);
    }

    #[test]
    fn field_tables() {
        assert_eq!(Mnemonic::Add.opcode(), 0b011_0011);
        assert_eq!(Mnemonic::Sub.funct7(), 0b010_0000);
        assert_eq!(Mnemonic::And.funct3(), 0b111);
        assert_eq!(Mnemonic::Or.funct3(), 0b110);
        assert_eq!(Mnemonic::Srl.funct3(), 0b101);
        assert_eq!(Mnemonic::Slt.funct3(), 0b010);
        assert_eq!(Mnemonic::Lw.opcode(), 0b000_0011);
        assert_eq!(Mnemonic::Jalr.opcode(), 0b110_0111);
        assert_eq!(Mnemonic::Sw.opcode(), 0b010_0011);
        assert_eq!(Mnemonic::Bne.funct3(), 0b001);
        assert_eq!(Mnemonic::Jal.opcode(), 0b110_1111);
    }
}

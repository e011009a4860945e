//! Error types and line-oriented diagnostics.

use std::fmt;

/// Assembly error with the 1-indexed source line it was detected on.
///
/// Every variant carries enough context to format a human-readable
/// diagnostic; the driver decides whether an error terminates the run
/// (in the current dialect, all of them do).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsmError {
    /// Register operand is not one of the 64 canonical spellings.
    UnknownRegister {
        /// The register name as written in the source.
        name: String,
        /// 1-indexed source line.
        line: u32,
    },

    /// Literal immediate violates the dialect's bound, or a branch
    /// displacement is odd.
    InvalidImmediate {
        /// The offending immediate value (byte displacement for branches).
        value: i64,
        /// 1-indexed source line.
        line: u32,
    },

    /// A branch/jump target names a label that pass 1 never recorded.
    UndefinedLabel {
        /// The unresolved label name.
        label: String,
        /// 1-indexed source line.
        line: u32,
    },

    /// The final physical line is not the sentinel `beq zero,zero,0`.
    MissingTerminator {
        /// 1-indexed number of the last line (0 for empty input).
        line: u32,
    },

    /// Mnemonic matches none of the five format tables.
    UnsupportedOpcode {
        /// The mnemonic as written in the source.
        mnemonic: String,
        /// 1-indexed source line.
        line: u32,
    },

    /// Operand text does not fit the shape the format requires
    /// (wrong arity, bad `offset(reg)` syntax, non-integer literal, …).
    MalformedOperands {
        /// Description of what was expected.
        detail: String,
        /// 1-indexed source line.
        line: u32,
    },
}

impl AsmError {
    /// The 1-indexed source line the error was detected on.
    #[must_use]
    pub fn line(&self) -> u32 {
        match self {
            AsmError::UnknownRegister { line, .. }
            | AsmError::InvalidImmediate { line, .. }
            | AsmError::UndefinedLabel { line, .. }
            | AsmError::MissingTerminator { line }
            | AsmError::UnsupportedOpcode { line, .. }
            | AsmError::MalformedOperands { line, .. } => *line,
        }
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmError::UnknownRegister { name, line } => {
                write!(f, "line {}: unknown register '{}'", line, name)
            }
            AsmError::InvalidImmediate { value, line } => {
                write!(f, "line {}: invalid immediate value {}", line, value)
            }
            AsmError::UndefinedLabel { label, line } => {
                write!(f, "line {}: undefined label '{}'", line, label)
            }
            AsmError::MissingTerminator { line } => {
                write!(
                    f,
                    "line {}: program must end with the terminator 'beq zero,zero,0'",
                    line
                )
            }
            AsmError::UnsupportedOpcode { mnemonic, line } => {
                write!(f, "line {}: unsupported opcode '{}'", line, mnemonic)
            }
            AsmError::MalformedOperands { detail, line } => {
                write!(f, "line {}: malformed operands: {}", line, detail)
            }
        }
    }
}

impl std::error::Error for AsmError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_register_display() {
        let err = AsmError::UnknownRegister {
            name: "x99".into(),
            line: 3,
        };
        assert_eq!(format!("{}", err), "line 3: unknown register 'x99'");
    }

    #[test]
    fn invalid_immediate_display() {
        let err = AsmError::InvalidImmediate { value: -8, line: 1 };
        assert_eq!(format!("{}", err), "line 1: invalid immediate value -8");
    }

    #[test]
    fn undefined_label_display() {
        let err = AsmError::UndefinedLabel {
            label: "loop".into(),
            line: 7,
        };
        assert_eq!(format!("{}", err), "line 7: undefined label 'loop'");
    }

    #[test]
    fn missing_terminator_display() {
        let err = AsmError::MissingTerminator { line: 12 };
        assert_eq!(
            format!("{}", err),
            "line 12: program must end with the terminator 'beq zero,zero,0'"
        );
    }

    #[test]
    fn unsupported_opcode_display() {
        let err = AsmError::UnsupportedOpcode {
            mnemonic: "mul".into(),
            line: 2,
        };
        assert_eq!(format!("{}", err), "line 2: unsupported opcode 'mul'");
    }

    #[test]
    fn malformed_operands_display() {
        let err = AsmError::MalformedOperands {
            detail: "expected 3 operands, found 2".into(),
            line: 5,
        };
        assert_eq!(
            format!("{}", err),
            "line 5: malformed operands: expected 3 operands, found 2"
        );
    }

    #[test]
    fn line_accessor() {
        let err = AsmError::MissingTerminator { line: 9 };
        assert_eq!(err.line(), 9);
    }
}

//! Two-pass assembly driver.
//!
//! Pass 1 resolves labels over the full source (and enforces the terminator
//! invariant); pass 2 walks the lines in address order, parsing and encoding
//! each one. Any error aborts the run — the dialect has no partial-success
//! mode, so a successful assembly always yields exactly one word per source
//! line.

use crate::encoder::encode;
use crate::error::AsmError;
use crate::labels::LabelTable;
use crate::parser::{parse_instruction, split_label};

/// The result of a successful assembly: one 32-bit word per source line,
/// plus the resolved label table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Program {
    words: Vec<u32>,
    labels: Vec<(String, u32)>,
}

impl Program {
    /// The encoded machine words, in source order.
    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Resolved labels as `(name, byte address)` pairs, in name order.
    #[must_use]
    pub fn labels(&self) -> &[(String, u32)] {
        &self.labels
    }

    /// Look up one label's byte address.
    #[must_use]
    pub fn label_address(&self, name: &str) -> Option<u32> {
        self.labels
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, addr)| *addr)
    }

    /// Number of encoded words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the program contains no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Render each word as exactly 32 `'0'`/`'1'` characters, MSB first.
    #[must_use]
    pub fn to_bit_lines(&self) -> Vec<String> {
        self.words.iter().map(|w| format!("{:032b}", w)).collect()
    }

    /// The full output listing: one 32-character line per word, each
    /// terminated by a newline. No header, no separators.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.words.len() * 33);
        for word in &self.words {
            out.push_str(&format!("{:032b}\n", word));
        }
        out
    }
}

/// Assemble a full source file into a [`Program`].
///
/// # Errors
///
/// `MissingTerminator` if the final line is not the sentinel, otherwise the
/// first per-line error encountered in address order (see [`AsmError`]).
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    let labels = LabelTable::scan(source)?;

    let mut words = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index as u32 + 1;
        let address = index as u32 * 4;
        let (_, text) = split_label(raw);
        let instr = parse_instruction(text, line)?;
        words.push(encode(&instr, address, &labels, line)?);
    }

    Ok(Program {
        words,
        labels: labels
            .iter()
            .map(|(name, addr)| (name.to_string(), addr))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_word_per_line() {
        let program = assemble("add x1,x2,x3\nadd x4,x5,x6\nbeq zero,zero,0").unwrap();
        assert_eq!(program.len(), 3);
    }

    #[test]
    fn bit_lines_are_32_chars() {
        let program = assemble("add x5,x6,x7\nbeq zero,zero,0").unwrap();
        for line in program.to_bit_lines() {
            assert_eq!(line.len(), 32);
            assert!(line.chars().all(|c| c == '0' || c == '1'));
        }
    }

    #[test]
    fn to_text_one_line_per_word() {
        let program = assemble("add x5,x6,x7\nbeq zero,zero,0").unwrap();
        let text = program.to_text();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn labels_exposed_on_result() {
        let program = assemble("fn: add x1,x2,x3\njal x1,fn\nbeq zero,zero,0").unwrap();
        assert_eq!(program.label_address("fn"), Some(0));
        assert_eq!(program.labels(), &[(String::from("fn"), 0)]);
    }

    #[test]
    fn parse_errors_are_fatal() {
        assert!(assemble("add x1,x2\nbeq zero,zero,0").is_err());
    }

    #[test]
    fn error_carries_first_failing_line() {
        let err = assemble("add x1,x2,x3\nadd x9,x9\nbeq zero,zero,0").unwrap_err();
        assert_eq!(err.line(), 2);
    }
}

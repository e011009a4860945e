//! First-pass label resolution.
//!
//! A single forward pass over the source assigns every physical line the
//! address `4 × line_index` — blank and malformed lines included — and
//! records each label definition at the address of its own line (a label and
//! its instruction share one line). The pass also enforces the
//! program-termination invariant: the final physical line must be the
//! sentinel `beq zero,zero,0`, which traps execution in an infinite
//! self-loop instead of falling through into undefined trailing bytes.

use std::collections::BTreeMap;

use crate::error::AsmError;
use crate::parser::split_label;

/// The mandatory final line of every program.
pub const TERMINATOR: &str = "beq zero,zero,0";

/// Mapping from label name to byte address, built once in pass 1 and
/// read-only during pass 2.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelTable {
    entries: BTreeMap<String, u32>,
}

impl LabelTable {
    /// Scan the full source and build the label table.
    ///
    /// The first definition of a name wins; later redefinitions are silently
    /// ignored. Scanning the same source twice yields identical tables.
    ///
    /// # Errors
    ///
    /// `MissingTerminator` if the last physical line (surrounding whitespace
    /// aside) is not exactly [`TERMINATOR`]. This check is fatal for the
    /// whole run; no addresses are handed out past it.
    pub fn scan(source: &str) -> Result<LabelTable, AsmError> {
        let line_count = source.lines().count() as u32;
        match source.lines().last() {
            Some(last) if last.trim() == TERMINATOR => {}
            _ => return Err(AsmError::MissingTerminator { line: line_count }),
        }

        let mut entries = BTreeMap::new();
        let mut address: u32 = 0;
        for line in source.lines() {
            if let (Some(name), _) = split_label(line) {
                entries.entry(name.to_string()).or_insert(address);
            }
            address += 4;
        }
        Ok(LabelTable { entries })
    }

    /// Look up a label's byte address.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no labels were defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, address)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, addr)| (name.as_str(), *addr))
    }
}

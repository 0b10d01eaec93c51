//! Core types for timeline comparison
//!

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// Kind of edit step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    /// `a[a_start..a_end] == b[b_start..b_end]`
    Equal,
    /// `a[a_start..a_end]` is replaced by `b[b_start..b_end]`
    Replace,
    /// `a[a_start..a_end]` is removed
    Delete,
    /// `b[b_start..b_end]` is inserted at `a_start`
    Insert,
}

impl OpTag {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Replace => "replace",
            Self::Delete => "delete",
            Self::Insert => "insert",
        }
    }
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad so width/alignment flags apply
        f.pad(self.as_str())
    }
}

/// One step of an edit script, with half-open ranges into both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Opcode {
    pub tag: OpTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

impl Opcode {
    #[must_use]
    pub fn new(tag: OpTag, a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Self {
        Self {
            tag,
            a_start,
            a_end,
            b_start,
            b_end,
        }
    }

    #[must_use]
    pub fn a_range(&self) -> Range<usize> {
        self.a_start..self.a_end
    }

    #[must_use]
    pub fn b_range(&self) -> Range<usize> {
        self.b_start..self.b_end
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<7} [{}:{}] --> [{}:{}]",
            self.tag.as_str(),
            self.a_start,
            self.a_end,
            self.b_start,
            self.b_end
        )
    }
}

/// Result of comparing two timelines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    /// Edit script from the old timeline to the new one
    pub opcodes: Vec<Opcode>,
}

impl DiffResult {
    /// Check if the timelines are identical
    pub fn is_identical(&self) -> bool {
        self.opcodes.iter().all(|op| op.tag == OpTag::Equal)
    }

    /// Count non-equal opcodes
    pub fn change_count(&self) -> usize {
        self.opcodes
            .iter()
            .filter(|op| op.tag != OpTag::Equal)
            .count()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let count = self.change_count();
        if count == 0 {
            "No differences".to_string()
        } else {
            let (mut inserted, mut deleted) = (0, 0);
            for op in self.opcodes.iter().filter(|op| op.tag != OpTag::Equal) {
                deleted += op.a_end - op.a_start;
                inserted += op.b_end - op.b_start;
            }
            format!("{count} change(s): {deleted} edit unit(s) removed, {inserted} edit unit(s) added")
        }
    }

    /// Rebuild `b` from `a` by replaying the edit script.
    ///
    /// `b` supplies the inserted and replacing elements; only the ranges
    /// named by `insert` and `replace` opcodes are read from it.
    pub fn apply<T: Clone>(&self, a: &[T], b: &[T]) -> Vec<T> {
        let mut out = Vec::with_capacity(b.len());
        for op in &self.opcodes {
            match op.tag {
                OpTag::Equal => out.extend_from_slice(&a[op.a_range()]),
                OpTag::Replace | OpTag::Insert => out.extend_from_slice(&b[op.b_range()]),
                OpTag::Delete => {}
            }
        }
        out
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.opcodes {
            writeln!(f, "{op}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_display() {
        let op = Opcode::new(OpTag::Equal, 0, 2, 0, 2);
        assert_eq!(op.to_string(), "equal   [0:2] --> [0:2]");

        let op = Opcode::new(OpTag::Replace, 10, 12, 9, 14);
        assert_eq!(op.to_string(), "replace [10:12] --> [9:14]");

        assert_eq!(format!("{:<7}|", OpTag::Insert), "insert |");
    }

    #[test]
    fn test_summary() {
        let result = DiffResult {
            opcodes: vec![
                Opcode::new(OpTag::Equal, 0, 2, 0, 2),
                Opcode::new(OpTag::Insert, 2, 2, 2, 3),
                Opcode::new(OpTag::Equal, 2, 3, 3, 4),
            ],
        };
        assert!(!result.is_identical());
        assert_eq!(result.change_count(), 1);
        assert_eq!(
            result.summary(),
            "1 change(s): 0 edit unit(s) removed, 1 edit unit(s) added"
        );
        assert_eq!(
            result.to_string(),
            "equal   [0:2] --> [0:2]\ninsert  [2:2] --> [2:3]\nequal   [2:3] --> [3:4]\n"
        );

        let empty = DiffResult::default();
        assert!(empty.is_identical());
        assert_eq!(empty.summary(), "No differences");
    }

    #[test]
    fn test_serialized_tags() {
        let op = Opcode::new(OpTag::Delete, 1, 4, 1, 1);
        let json = serde_json::to_value(op).unwrap();
        assert_eq!(json["tag"], "delete");
        assert_eq!(json["a_end"], 4);
    }
}

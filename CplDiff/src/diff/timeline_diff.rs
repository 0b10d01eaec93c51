//! CPL timeline diffing
//!

use std::path::Path;

use crate::cpl::{self, Timeline};
use crate::error::{Error, Result};

use super::sequence_matcher::align;
use super::types::DiffResult;

/// Diff two CPL files
///
/// # Errors
/// Returns an error if either file cannot be read or built into a timeline,
/// or if the two compositions have different edit rates.
pub fn diff_files<P: AsRef<Path>>(old: P, new: P) -> Result<DiffResult> {
    let old = cpl::read_cpl(old)?;
    let new = cpl::read_cpl(new)?;
    diff_timelines(&old, &new)
}

/// Diff two main image timelines
///
/// # Errors
/// Returns [`Error::EditRateMismatch`] if the edit rates are not exactly
/// equal; no opcodes are produced in that case.
pub fn diff_timelines(old: &Timeline, new: &Timeline) -> Result<DiffResult> {
    if old.edit_rate() != new.edit_rate() {
        return Err(Error::EditRateMismatch {
            old: old.edit_rate(),
            new: new.edit_rate(),
        });
    }

    let opcodes = align(old.units(), new.units());
    tracing::debug!(
        "Aligned {} against {} edit units: {} opcode(s)",
        old.len(),
        new.len(),
        opcodes.len()
    );

    Ok(DiffResult { opcodes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpl::{EditRate, EditUnit};
    use crate::diff::{OpTag, Opcode};
    use pretty_assertions::assert_eq;

    fn timeline(rate: (u64, u64), units: &[(u64, &str)]) -> Timeline {
        Timeline::new(
            EditRate::new(rate.0, rate.1).unwrap(),
            units
                .iter()
                .map(|&(index, id)| EditUnit::new(index, Some(id)))
                .collect(),
        )
    }

    #[test]
    fn test_inserted_edit_unit() {
        let old = timeline((24, 1), &[(0, "r1"), (1, "r1"), (2, "r1")]);
        let new = timeline((24, 1), &[(0, "r1"), (1, "r1"), (9, "r2"), (2, "r1")]);

        let result = diff_timelines(&old, &new).unwrap();
        assert_eq!(
            result.opcodes,
            vec![
                Opcode::new(OpTag::Equal, 0, 2, 0, 2),
                Opcode::new(OpTag::Insert, 2, 2, 2, 3),
                Opcode::new(OpTag::Equal, 2, 3, 3, 4),
            ]
        );
        assert_eq!(result.apply(old.units(), new.units()), new.units());
    }

    #[test]
    fn test_identical_timeline() {
        let old = timeline((24, 1), &[(0, "r1"), (1, "r1"), (2, "r1")]);
        let result = diff_timelines(&old, &old).unwrap();
        assert_eq!(result.opcodes, vec![Opcode::new(OpTag::Equal, 0, 3, 0, 3)]);
        assert!(result.is_identical());
    }

    #[test]
    fn test_source_id_distinguishes_units() {
        let old = timeline((24, 1), &[(0, "r1"), (1, "r1")]);
        let new = timeline((24, 1), &[(0, "r2"), (1, "r1")]);
        let result = diff_timelines(&old, &new).unwrap();
        assert_eq!(
            result.opcodes,
            vec![
                Opcode::new(OpTag::Replace, 0, 1, 0, 1),
                Opcode::new(OpTag::Equal, 1, 2, 1, 2),
            ]
        );
    }

    #[test]
    fn test_edit_rate_mismatch() {
        let old = timeline((24000, 1001), &[(0, "r1")]);
        let new = timeline((25, 1), &[(0, "r1")]);

        let err = diff_timelines(&old, &new).unwrap_err();
        assert!(matches!(err, Error::EditRateMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "the two Compositions do not have identical edit rates (24000/1001 vs 25/1)"
        );
    }

    #[test]
    fn test_equivalent_edit_rates() {
        let old = timeline((48, 2), &[(0, "r1")]);
        let new = timeline((24, 1), &[(0, "r1")]);
        assert!(diff_timelines(&old, &new).is_ok());
    }
}

//! Timeline comparison
//!
//! Aligns the main image timelines of two compositions and describes the
//! second as an edit script over the first.
//!
//! # Diffing Files
//!
//! ```no_run
//! use cpldiff::diff::diff_files;
//!
//! let result = diff_files("old/CPL.xml", "new/CPL.xml")?;
//! for opcode in &result.opcodes {
//!     println!("{opcode}");
//! }
//! # Ok::<(), cpldiff::Error>(())
//! ```
//!
//! # Aligning Arbitrary Sequences
//!
//! ```
//! use cpldiff::diff::{align, OpTag};
//!
//! let opcodes = align(&[1, 2, 3], &[1, 2, 9, 3]);
//! assert_eq!(opcodes[1].tag, OpTag::Insert);
//! assert_eq!(opcodes[1].to_string(), "insert  [2:2] --> [2:3]");
//! ```
//!

mod sequence_matcher;
mod timeline_diff;
mod types;

pub use sequence_matcher::{align, MatchingBlock, SequenceMatcher};
pub use timeline_diff::{diff_files, diff_timelines};
pub use types::{DiffResult, OpTag, Opcode};

//! # cpldiff
//!
//! Compares the timelines of two IMF Compositions.
//!
//! The main image virtual track of each Composition Playlist (CPL) is
//! flattened into a sequence of edit units, each identified by the track
//! file it comes from and its index in that file. The two sequences are then
//! aligned with an exact longest-matching-block algorithm and the difference
//! is reported as `equal` / `replace` / `delete` / `insert` opcodes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cpldiff::prelude::*;
//!
//! let old = read_cpl("CPL_v1.xml")?;
//! let new = read_cpl("CPL_v2.xml")?;
//!
//! // Fails with Error::EditRateMismatch if the edit rates differ
//! let result = diff_timelines(&old, &new)?;
//! print!("{result}");
//! # Ok::<(), cpldiff::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `cpldiff` command-line binary

pub mod cpl;
pub mod diff;
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::cpl::{
        parse_cpl, read_cpl, EditRate, EditUnit, Timeline, TimelineWarning,
    };
    pub use crate::diff::{align, diff_files, diff_timelines, DiffResult, OpTag, Opcode};
    pub use crate::error::{Error, Result};
    pub use crate::xml::{parse_xml, read_xml, XmlDocument, XmlElement};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

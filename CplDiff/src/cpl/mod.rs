//! IMF Composition Playlist (CPL) timelines
//!
//! Only a minimal projection of the CPL is extracted: the main image virtual
//! track, flattened into one [`EditUnit`] per edit unit of presentation time,
//! plus the composition edit rate.
//!
//! ```no_run
//! use cpldiff::cpl::read_cpl;
//!
//! let timeline = read_cpl("CPL_old.xml")?;
//! println!("{} edit units at {}", timeline.len(), timeline.edit_rate());
//! # Ok::<(), cpldiff::Error>(())
//! ```

mod builder;
pub mod namespaces;
mod types;

use std::path::Path;

use crate::error::Result;
use crate::xml;

pub use builder::Resource;
pub use types::{EditRate, EditUnit, Timeline, TimelineWarning};

/// Read a CPL file and build its main image timeline
///
/// # Errors
/// Returns an error if the file cannot be read, is not well-formed XML, or
/// lacks a required field.
pub fn read_cpl<P: AsRef<Path>>(path: P) -> Result<Timeline> {
    let path = path.as_ref();
    tracing::debug!("Reading CPL {}", path.display());
    let doc = xml::read_xml(path)?;
    Timeline::from_document(&doc.root)
}

/// Parse a CPL document held in memory
///
/// # Errors
/// Returns an error if the XML is malformed or lacks a required field.
pub fn parse_cpl(content: &str) -> Result<Timeline> {
    let doc = xml::parse_xml(content)?;
    Timeline::from_document(&doc.root)
}

//! Namespace-aware XML element tree
//!
//! Documents are read with `quick_xml`'s namespace resolver into a small
//! owned tree, which is then queried through plain tree-walk methods on
//! [`XmlElement`] rather than a query language.

mod document;
mod reader;

pub use document::{Descendants, QName, XmlDocument, XmlElement};
pub use reader::{parse_xml, read_xml};

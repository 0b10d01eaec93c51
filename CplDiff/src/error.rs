//! Error types for `cpldiff`

use thiserror::Error;

use crate::cpl::EditRate;

/// The error type for `cpldiff` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== XML Errors ====================
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttr(String),

    /// The document has no root element.
    #[error("document has no root element")]
    MissingRootElement,

    /// The element structure is not well-formed (unbalanced or multiple roots).
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    // ==================== Composition Errors ====================
    /// A required field is absent and has no fallback.
    #[error("{element} is missing required field {field}")]
    MissingField {
        /// The element that should carry the field.
        element: String,
        /// The missing field (or list of accepted fields).
        field: String,
    },

    /// The edit rate text is not two integers with a non-zero denominator.
    #[error("invalid edit rate: {0:?}")]
    InvalidEditRate(String),

    /// An integer field could not be parsed.
    #[error("invalid integer in {field}: {value:?}")]
    InvalidInteger {
        /// The field name.
        field: String,
        /// The raw field text.
        value: String,
    },

    // ==================== Comparison Errors ====================
    /// The two compositions do not share an edit rate.
    #[error("the two Compositions do not have identical edit rates ({old} vs {new})")]
    EditRateMismatch {
        /// Edit rate of the first composition.
        old: EditRate,
        /// Edit rate of the second composition.
        new: EditRate,
    },
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(err.to_string())
    }
}

/// A specialized Result type for `cpldiff` operations.
pub type Result<T> = std::result::Result<T, Error>;

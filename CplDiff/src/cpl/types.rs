//! Timeline data types
//!

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// An exact rational edit rate (frames or samples per second).
///
/// Two rates are equal when they denote the same rational number, so
/// `48/2 == 24/1`. Comparison never goes through floating point.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EditRate {
    /// Numerator (units per `denominator` seconds).
    pub numerator: u64,
    /// Denominator, never zero.
    pub denominator: u64,
}

impl EditRate {
    /// Creates an edit rate, returning `None` for a zero denominator.
    #[must_use]
    pub fn new(numerator: u64, denominator: u64) -> Option<Self> {
        (denominator != 0).then_some(Self {
            numerator,
            denominator,
        })
    }

    /// Parse a CPL rational: two whitespace-separated integers
    /// (`"24000 1001"`), or a single integer meaning `n/1`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEditRate`] for anything else, including a zero
    /// denominator.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidEditRate(text.to_string());

        let mut parts = text.split_whitespace();
        let numerator = parts.next().ok_or_else(invalid)?;
        let denominator = parts.next().unwrap_or("1");
        if parts.next().is_some() {
            return Err(invalid());
        }

        let numerator: u64 = numerator.parse().map_err(|_| invalid())?;
        let denominator: u64 = denominator.parse().map_err(|_| invalid())?;
        Self::new(numerator, denominator).ok_or_else(invalid)
    }

    /// The same rate in lowest terms.
    #[must_use]
    pub fn reduced(&self) -> Self {
        let divisor = gcd(self.numerator, self.denominator);
        Self {
            numerator: self.numerator / divisor,
            denominator: self.denominator / divisor,
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    // denominator is non-zero, so the result is too
    a
}

impl PartialEq for EditRate {
    fn eq(&self, other: &Self) -> bool {
        u128::from(self.numerator) * u128::from(other.denominator)
            == u128::from(other.numerator) * u128::from(self.denominator)
    }
}

impl Eq for EditRate {}

impl Hash for EditRate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let reduced = self.reduced();
        reduced.numerator.hash(state);
        reduced.denominator.hash(state);
    }
}

impl FromStr for EditRate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for EditRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// One edit unit of the main image track.
///
/// `index` is the position inside the source track file and `source_id`
/// the `TrackFileId` of the resource that occupies the slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EditUnit {
    /// Edit unit index within the source track file.
    pub index: u64,
    /// Track file identifier, if the resource names one.
    pub source_id: Option<String>,
}

impl EditUnit {
    #[must_use]
    pub fn new(index: u64, source_id: Option<&str>) -> Self {
        Self {
            index,
            source_id: source_id.map(String::from),
        }
    }
}

impl fmt::Display for EditUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_id {
            Some(id) => write!(f, "({}, {id})", self.index),
            None => write!(f, "({}, -)", self.index),
        }
    }
}

/// A non-fatal schema issue found while building a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineWarning {
    /// The root element is in a namespace outside the known CPL versions.
    UnknownCplNamespace(Option<String>),
    /// The root element is not `CompositionPlaylist`.
    UnknownRootElement(String),
    /// A sequence has no `TrackId` and was skipped.
    MissingTrackId {
        /// Local name of the sequence element.
        sequence: String,
    },
    /// A sequence is in an unknown virtual track namespace and was skipped.
    UnknownSequenceNamespace {
        /// Local name of the sequence element.
        sequence: String,
        /// The sequence namespace.
        namespace: Option<String>,
    },
}

impl TimelineWarning {
    /// Emit this warning through `tracing`.
    pub(crate) fn log(&self) {
        match self {
            Self::UnknownCplNamespace(_) | Self::UnknownRootElement(_) | Self::MissingTrackId { .. } => {
                tracing::error!("{self}");
            }
            Self::UnknownSequenceNamespace { .. } => tracing::warn!("{self}"),
        }
    }
}

impl fmt::Display for TimelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCplNamespace(ns) => write!(
                f,
                "Unknown CompositionPlaylist namespace: {}",
                ns.as_deref().unwrap_or("(none)")
            ),
            Self::UnknownRootElement(name) => {
                write!(f, "Unknown CompositionPlaylist element name: {name}")
            }
            Self::MissingTrackId { sequence } => write!(f, "{sequence} is missing TrackId"),
            Self::UnknownSequenceNamespace {
                sequence,
                namespace,
            } => write!(
                f,
                "Unknown virtual track namespace {} on {sequence}",
                namespace.as_deref().unwrap_or("(none)")
            ),
        }
    }
}

/// The main image timeline of a composition.
#[derive(Debug, Clone)]
pub struct Timeline {
    edit_rate: EditRate,
    units: Vec<EditUnit>,
    warnings: Vec<TimelineWarning>,
}

impl Timeline {
    /// Creates a timeline from already expanded edit units.
    #[must_use]
    pub fn new(edit_rate: EditRate, units: Vec<EditUnit>) -> Self {
        Self {
            edit_rate,
            units,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_warnings(mut self, warnings: Vec<TimelineWarning>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Composition edit rate.
    #[must_use]
    pub fn edit_rate(&self) -> EditRate {
        self.edit_rate
    }

    /// Edit units in presentation order.
    #[must_use]
    pub fn units(&self) -> &[EditUnit] {
        &self.units
    }

    /// Schema issues recorded while building this timeline.
    #[must_use]
    pub fn warnings(&self) -> &[TimelineWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EditUnit> {
        self.units.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditUnit> {
        self.units.iter()
    }
}

impl Index<usize> for Timeline {
    type Output = EditUnit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.units[index]
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a EditUnit;
    type IntoIter = std::slice::Iter<'a, EditUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

//! Main image timeline construction from a CPL element tree

use crate::error::{Error, Result};
use crate::xml::XmlElement;

use super::namespaces::{
    is_core_namespace, is_cpl_namespace, COMPOSITION_PLAYLIST, MAIN_IMAGE_SEQUENCE,
};
use super::types::{EditRate, EditUnit, Timeline, TimelineWarning};

/// Duration fields of a resource, in order of precedence.
const DURATION_FIELDS: &[&str] = &["SourceDuration", "IntrinsicDuration"];

/// A `Resource` entry of a virtual track sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// First edit unit of the source used by the resource.
    pub entry_point: u64,
    /// Number of edit units played per repetition.
    pub duration: u64,
    /// Number of times the resource is played back to back.
    pub repeat_count: u64,
    /// `TrackFileId` of the source, if any.
    pub source_id: Option<String>,
}

impl Resource {
    /// Read a resource from its element.
    ///
    /// `EntryPoint` defaults to 0 and `RepeatCount` to 1. The duration is the
    /// first present of `SourceDuration` and `IntrinsicDuration`.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] when no duration field is present and
    /// [`Error::InvalidInteger`] when a field is not an integer.
    pub fn from_element(element: &XmlElement, namespace: Option<&str>) -> Result<Self> {
        let entry_point = integer_field(element, namespace, "EntryPoint")?.unwrap_or(0);
        let repeat_count = integer_field(element, namespace, "RepeatCount")?.unwrap_or(1);

        let duration = first_present(element, namespace, DURATION_FIELDS)?.ok_or_else(|| {
            Error::MissingField {
                element: element.name.local_name.clone(),
                field: DURATION_FIELDS.join(" or "),
            }
        })?;

        let source_id = element
            .descendant_text(namespace, "TrackFileId")
            .map(String::from);

        let resource = Self {
            entry_point,
            duration,
            repeat_count,
            source_id,
        };
        resource.end()?;
        Ok(resource)
    }

    /// One past the last edit unit index of a single pass.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInteger`] if `entry_point + duration` does not
    /// fit in a `u64`.
    pub fn end(&self) -> Result<u64> {
        self.entry_point
            .checked_add(self.duration)
            .ok_or_else(|| Error::InvalidInteger {
                field: "EntryPoint".to_string(),
                value: format!("{} + {}", self.entry_point, self.duration),
            })
    }

    /// Expand into edit units: `repeat_count` passes over
    /// `entry_point..entry_point + duration`.
    ///
    /// # Errors
    /// Fails like [`Resource::end`].
    pub fn edit_units(&self) -> Result<impl Iterator<Item = EditUnit> + '_> {
        let end = self.end()?;
        Ok((0..self.repeat_count).flat_map(move |_| {
            (self.entry_point..end).map(move |index| EditUnit {
                index,
                source_id: self.source_id.clone(),
            })
        }))
    }
}

/// Text of the first descendant named `field`, treating empty text as absent.
fn field_text<'a>(element: &'a XmlElement, namespace: Option<&str>, field: &str) -> Option<&'a str> {
    element
        .descendant_text(namespace, field)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn parse_integer(field: &str, text: &str) -> Result<u64> {
    text.parse().map_err(|_| Error::InvalidInteger {
        field: field.to_string(),
        value: text.to_string(),
    })
}

fn integer_field(element: &XmlElement, namespace: Option<&str>, field: &str) -> Result<Option<u64>> {
    field_text(element, namespace, field)
        .map(|text| parse_integer(field, text))
        .transpose()
}

/// Try each field in order and parse the first one present.
fn first_present(element: &XmlElement, namespace: Option<&str>, fields: &[&str]) -> Result<Option<u64>> {
    fields
        .iter()
        .find_map(|field| field_text(element, namespace, field).map(|text| (*field, text)))
        .map(|(field, text)| parse_integer(field, text))
        .transpose()
}

impl Timeline {
    /// Build the main image timeline of a CPL from its root element.
    ///
    /// Unknown namespaces, a missing `TrackId`, and sequences outside the
    /// core constraints namespaces are logged, recorded on the timeline, and
    /// skipped.
    ///
    /// # Errors
    /// Returns an error if the edit rate, the sequence list, or a resource
    /// duration is missing, or if a value cannot be parsed.
    pub fn from_document(root: &XmlElement) -> Result<Self> {
        build(root)
    }
}

fn build(root: &XmlElement) -> Result<Timeline> {
    let mut warnings = Vec::new();
    let mut report = |warning: TimelineWarning| {
        warning.log();
        warnings.push(warning);
    };

    let ns = root.name.namespace.as_deref();

    if !is_cpl_namespace(ns) {
        report(TimelineWarning::UnknownCplNamespace(ns.map(String::from)));
    }
    if root.name.local_name != COMPOSITION_PLAYLIST {
        report(TimelineWarning::UnknownRootElement(root.name.local_name.clone()));
    }

    let edit_rate_text = root
        .descendant_text(ns, "EditRate")
        .ok_or_else(|| Error::MissingField {
            element: root.name.local_name.clone(),
            field: "EditRate".to_string(),
        })?;
    let edit_rate = EditRate::parse(edit_rate_text)?;

    let sequence_list = root
        .element_path(ns, &["SegmentList", "Segment", "SequenceList"])
        .ok_or_else(|| Error::MissingField {
            element: "Segment".to_string(),
            field: "SequenceList".to_string(),
        })?;

    let mut units = Vec::new();

    for sequence in &sequence_list.children {
        let sequence_name = &sequence.name.local_name;

        let Some(track_id) = sequence.child_text(ns, "TrackId") else {
            report(TimelineWarning::MissingTrackId {
                sequence: sequence_name.clone(),
            });
            continue;
        };

        let sequence_ns = sequence.name.namespace.as_deref();
        if !is_core_namespace(sequence_ns) {
            report(TimelineWarning::UnknownSequenceNamespace {
                sequence: sequence_name.clone(),
                namespace: sequence_ns.map(String::from),
            });
            continue;
        }

        if sequence_name != MAIN_IMAGE_SEQUENCE {
            tracing::debug!("Skipping {} (track {})", sequence_name, track_id);
            continue;
        }

        let start = units.len();
        for resource in track_resources(root, ns, track_id) {
            let resource = Resource::from_element(resource, ns)?;
            units.extend(resource.edit_units()?);
        }
        tracing::debug!(
            "Track {} contributes {} edit units",
            track_id,
            units.len() - start
        );
    }

    Ok(Timeline::new(edit_rate, units).with_warnings(warnings))
}

/// All `Resource` elements of every sequence, in every segment, that carries
/// `track_id`, in document order.
fn track_resources<'a>(
    root: &'a XmlElement,
    ns: Option<&'a str>,
    track_id: &'a str,
) -> impl Iterator<Item = &'a XmlElement> + 'a {
    root.children_named(ns, "SegmentList")
        .flat_map(move |list| list.children_named(ns, "Segment"))
        .flat_map(move |segment| segment.children_named(ns, "SequenceList"))
        .flat_map(|sequences| sequences.children.iter())
        .filter(move |sequence| {
            sequence
                .children_named(ns, "TrackId")
                .any(|id| id.text == track_id)
        })
        .flat_map(move |sequence| sequence.children_named(ns, "ResourceList"))
        .flat_map(move |list| list.children_named(ns, "Resource"))
}

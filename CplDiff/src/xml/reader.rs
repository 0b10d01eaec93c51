//! XML reading into an [`XmlDocument`] tree

use super::document::{QName, XmlDocument, XmlElement};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use std::fs;
use std::path::Path;

/// Read an XML file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or has invalid XML.
pub fn read_xml<P: AsRef<Path>>(path: P) -> Result<XmlDocument> {
    let content = fs::read_to_string(path)?;
    parse_xml(&content)
}

/// Parse an XML string into an element tree
///
/// # Errors
/// Returns an error if the XML is malformed or has no single root element.
pub fn parse_xml(content: &str) -> Result<XmlDocument> {
    let mut reader = NsReader::from_str(content);

    let mut root: Option<XmlElement> = None;
    let mut stack: Vec<XmlElement> = Vec::new();

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) => {
                let element = start_element(&ns, &e)?;
                stack.push(element);
            }
            Ok((ns, Event::Empty(e))) => {
                let element = start_element(&ns, &e)?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok((_, Event::End(_))) => {
                let completed = stack.pop().ok_or_else(|| {
                    Error::MalformedDocument("unexpected closing tag".to_string())
                })?;
                attach(completed, &mut stack, &mut root)?;
            }
            Ok((_, Event::Text(t))) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&t.unescape()?);
                }
            }
            Ok((_, Event::CData(c))) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(Error::Xml(e)),
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::MalformedDocument(format!(
            "unclosed element {}",
            open.name
        )));
    }

    root.map(|root| XmlDocument { root })
        .ok_or(Error::MissingRootElement)
}

/// Build an element from a start (or empty) tag.
fn start_element(ns: &ResolveResult, e: &BytesStart) -> Result<XmlElement> {
    let namespace = match ns {
        ResolveResult::Bound(namespace) => {
            Some(String::from_utf8_lossy(namespace.as_ref()).into_owned())
        }
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(Error::MalformedDocument(format!(
                "undeclared namespace prefix {}",
                String::from_utf8_lossy(prefix)
            )));
        }
    };
    let local_name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

    let mut element = XmlElement::new(QName {
        namespace,
        local_name,
    });

    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

/// Attach a completed element to its parent, or make it the root.
fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(Error::MalformedDocument(format!(
            "multiple root elements (found {})",
            element.name
        )));
    } else {
        *root = Some(element);
    }
    Ok(())
}

//! In-memory XML element tree
//!
//! Elements carry namespace-resolved names so that lookups compare the
//! namespace URI, never the prefix used in the source document.

use std::fmt;

/// A namespace-qualified element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI, `None` when the element is not in any namespace.
    pub namespace: Option<String>,
    /// Local part of the name.
    pub local_name: String,
}

impl QName {
    #[must_use]
    pub fn new(namespace: Option<&str>, local_name: &str) -> Self {
        Self {
            namespace: namespace.map(String::from),
            local_name: local_name.to_string(),
        }
    }

    /// Check whether this name matches a namespace and local name.
    #[must_use]
    pub fn matches(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == namespace
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// A parsed XML document.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    /// The document (root) element.
    pub root: XmlElement,
}

/// An element in an XML document.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// Resolved element name.
    pub name: QName,
    /// Attributes as written (prefixed key, unescaped value).
    pub attributes: Vec<(String, String)>,
    /// Character data directly inside this element.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an empty element with the given name.
    #[must_use]
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Get an attribute value by its key as written in the document.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children with the given qualified name, in document order.
    pub fn children_named<'a>(
        &'a self,
        namespace: Option<&'a str>,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children
            .iter()
            .filter(move |c| c.name.matches(namespace, local_name))
    }

    /// First direct child with the given qualified name.
    #[must_use]
    pub fn first_child_named(&self, namespace: Option<&str>, local_name: &str) -> Option<&XmlElement> {
        self.children
            .iter()
            .find(|c| c.name.matches(namespace, local_name))
    }

    /// Text of the first direct child with the given qualified name.
    #[must_use]
    pub fn child_text(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.first_child_named(namespace, local_name)
            .map(|c| c.text.as_str())
    }

    /// Walk a fixed path of child names, taking the first match at each step.
    #[must_use]
    pub fn element_path(&self, namespace: Option<&str>, path: &[&str]) -> Option<&XmlElement> {
        path.iter()
            .try_fold(self, |el, name| el.first_child_named(namespace, name))
    }

    /// All descendants (excluding `self`) in document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Text of the first descendant with the given qualified name.
    #[must_use]
    pub fn descendant_text(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.descendants()
            .find(|d| d.name.matches(namespace, local_name))
            .map(|d| d.text.as_str())
    }

    /// All descendants satisfying `predicate`, in document order.
    pub fn find_all<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = &'a XmlElement> + 'a
    where
        F: Fn(&XmlElement) -> bool + 'a,
    {
        self.descendants().filter(move |d| predicate(*d))
    }
}

/// Depth-first, pre-order iterator over the descendants of an element.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

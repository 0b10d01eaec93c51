//! Known CPL schema namespaces and element names

/// `CompositionPlaylist` namespaces (SMPTE ST 2067-3).
pub const COMPATIBLE_CPL_NS: &[&str] = &[
    "http://www.smpte-ra.org/schemas/2067-3/2016",
    "http://www.smpte-ra.org/schemas/2067-3/2013",
];

/// Core constraints namespaces for virtual track sequences (SMPTE ST 2067-2).
pub const COMPATIBLE_CORE_NS: &[&str] = &[
    "http://www.smpte-ra.org/schemas/2067-2/2013",
    "http://www.smpte-ra.org/schemas/2067-2/2016",
    "http://www.smpte-ra.org/ns/2067-2/2020",
];

/// Local name of the CPL root element.
pub const COMPOSITION_PLAYLIST: &str = "CompositionPlaylist";

/// Local name of the main image virtual track sequence.
pub const MAIN_IMAGE_SEQUENCE: &str = "MainImageSequence";

/// Check a CPL root namespace against the allow-list.
#[must_use]
pub fn is_cpl_namespace(namespace: Option<&str>) -> bool {
    namespace.is_some_and(|ns| COMPATIBLE_CPL_NS.contains(&ns))
}

/// Check a sequence namespace against the allow-list.
#[must_use]
pub fn is_core_namespace(namespace: Option<&str>) -> bool {
    namespace.is_some_and(|ns| COMPATIBLE_CORE_NS.contains(&ns))
}

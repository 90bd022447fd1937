//! Capability traits shared by every SBOM representation.
//!
//! Compliance checks only see SBOMs through [`Document`] and [`Component`].
//! Concrete formats implement these traits; nothing downstream downcasts.

use serde::{Deserialize, Serialize};

/// Read-only view of one SBOM document.
///
/// Absent data is reported as an empty string or an empty collection,
/// never as an error.
pub trait Document: Send + Sync {
    /// Lowercase dialect name, e.g. `spdx` or `cyclonedx`.
    fn spec_type(&self) -> &str;

    /// Serialization format, e.g. `json`, `xml`, `yaml`, `tag-value`.
    fn format(&self) -> &str;

    /// Version string as declared by the document.
    fn spec_version(&self) -> &str;

    /// Creation timestamp exactly as written in the document.
    fn creation_timestamp(&self) -> &str;

    /// Authors, tools and organizations credited with creating the document.
    fn creators(&self) -> &[Identity];

    /// All components in document order.
    fn components(&self) -> Vec<&dyn Component>;

    /// Number of direct dependencies declared by the primary component.
    ///
    /// Zero when the document does not name a primary component.
    fn primary_component_dependency_count(&self) -> usize;

    /// Direct dependency ids of the component with the given id.
    fn dependencies_of(&self, component_id: &str) -> Vec<&str>;
}

/// Read-only view of one component inside a [`Document`].
pub trait Component: Send + Sync {
    /// Document-unique identifier (SPDX id, bom-ref, ...).
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn supplier(&self) -> Option<&Identity>;

    fn external_references(&self) -> &[ExternalReference];
}

/// A person, organization or tool, identified by name and/or email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Identity known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    /// Identity known only by email.
    pub fn email(email: impl Into<String>) -> Self {
        Self::new("", email)
    }

    /// Parse an SPDX actor string such as `Organization: Acme (ops@acme.io)`.
    ///
    /// Returns `None` for `NOASSERTION`, `NONE` and blank input.
    #[must_use]
    pub fn from_spdx_actor(actor: &str) -> Option<Self> {
        let trimmed = actor.trim();
        let body = ["Tool:", "Organization:", "Person:"]
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed)
            .trim();

        if body.is_empty() || body == "NOASSERTION" || body == "NONE" {
            return None;
        }

        // Trailing "(email)" is optional and may be empty: "Person: Jane ()"
        if let Some(open) = body.rfind('(') {
            if body.ends_with(')') {
                let name = body[..open].trim();
                let email = body[open + 1..body.len() - 1].trim();
                return Some(Self::new(name, email));
            }
        }

        Some(Self::named(body))
    }

    /// The value shown in reports: the name, or the email when no name is set.
    #[must_use]
    pub fn display_value(&self) -> &str {
        if self.name.trim().is_empty() {
            self.email.trim()
        } else {
            self.name.trim()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.display_value().is_empty()
    }
}

/// A typed reference from a component to some external identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Normalized lowercase kind: `purl`, `cpe`, `website`, ...
    pub kind: String,
    pub locator: String,
}

impl ExternalReference {
    /// Create a reference, normalizing the kind.
    pub fn new(kind: &str, locator: impl Into<String>) -> Self {
        Self {
            kind: normalize_reference_kind(kind),
            locator: locator.into(),
        }
    }
}

/// Map format-specific reference type names onto one vocabulary.
///
/// SPDX spells CPE references `cpe22Type`/`cpe23Type`; both collapse to `cpe`.
#[must_use]
pub fn normalize_reference_kind(kind: &str) -> String {
    let lower = kind.trim().to_ascii_lowercase();
    match lower.as_str() {
        "cpe22type" | "cpe23type" | "cpe22" | "cpe23" => "cpe".to_string(),
        "package-url" | "package_url" => "purl".to_string(),
        _ => lower,
    }
}

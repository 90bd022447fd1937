//! SPDX-backed document variant.

use super::document::{Component, Document, ExternalReference, Identity};
use indexmap::{IndexMap, IndexSet};

/// Relationship types whose direction is `element -> related`.
const FORWARD_DEPENDENCY_TYPES: &[&str] = &["DEPENDS_ON", "CONTAINS"];

/// Relationship types whose direction is `related -> element`.
const REVERSE_DEPENDENCY_TYPES: &[&str] = &["DEPENDENCY_OF", "CONTAINED_BY"];

/// An SPDX 2.x document.
#[derive(Debug, Clone, Default)]
pub struct SpdxSbom {
    /// Serialization the document was read from (`json`, `yaml`, `tag-value`)
    pub format: String,
    /// Raw `spdxVersion`, e.g. `SPDX-2.3`
    pub spec_version: String,
    /// Raw `creationInfo.created`
    pub created: String,
    pub creators: Vec<Identity>,
    pub packages: Vec<SpdxComponent>,
    /// Dependency edges by source element, deduplicated, in document order
    pub dependencies: IndexMap<String, IndexSet<String>>,
    /// SPDX id of the package the document describes
    pub primary_id: Option<String>,
}

/// One SPDX package.
#[derive(Debug, Clone, Default)]
pub struct SpdxComponent {
    pub spdx_id: String,
    pub name: String,
    pub version: String,
    pub supplier: Option<Identity>,
    pub external_refs: Vec<ExternalReference>,
}

/// `element relationship_type related`, as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxRelationship {
    pub element: String,
    pub relationship_type: String,
    pub related: String,
}

impl SpdxRelationship {
    pub fn new(element: &str, relationship_type: &str, related: &str) -> Self {
        Self {
            element: element.trim().to_string(),
            relationship_type: relationship_type.trim().to_ascii_uppercase(),
            related: related.trim().to_string(),
        }
    }

    /// The `(from, to)` dependency edge this relationship encodes, if any.
    fn dependency_edge(&self) -> Option<(&str, &str)> {
        let kind = self.relationship_type.as_str();
        if FORWARD_DEPENDENCY_TYPES.contains(&kind) {
            Some((&self.element, &self.related))
        } else if REVERSE_DEPENDENCY_TYPES.contains(&kind) {
            Some((&self.related, &self.element))
        } else {
            None
        }
    }
}

impl SpdxSbom {
    /// Record the dependency edge a relationship encodes, if any.
    pub fn add_relationship(&mut self, relationship: &SpdxRelationship) {
        if let Some((from, to)) = relationship.dependency_edge() {
            self.dependencies
                .entry(from.to_string())
                .or_default()
                .insert(to.to_string());
        }
    }
}

impl Document for SpdxSbom {
    fn spec_type(&self) -> &str {
        "spdx"
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn spec_version(&self) -> &str {
        &self.spec_version
    }

    fn creation_timestamp(&self) -> &str {
        &self.created
    }

    fn creators(&self) -> &[Identity] {
        &self.creators
    }

    fn components(&self) -> Vec<&dyn Component> {
        self.packages.iter().map(|p| p as &dyn Component).collect()
    }

    fn primary_component_dependency_count(&self) -> usize {
        self.primary_id
            .as_deref()
            .map_or(0, |id| self.dependencies_of(id).len())
    }

    fn dependencies_of(&self, component_id: &str) -> Vec<&str> {
        self.dependencies
            .get(component_id)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl Component for SpdxComponent {
    fn id(&self) -> &str {
        &self.spdx_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn supplier(&self) -> Option<&Identity> {
        self.supplier.as_ref()
    }

    fn external_references(&self) -> &[ExternalReference] {
        &self.external_refs
    }
}

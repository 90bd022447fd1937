//! CycloneDX-backed document variant.

use super::document::{Component, Document, ExternalReference, Identity};
use indexmap::IndexMap;

/// A CycloneDX 1.x BOM.
#[derive(Debug, Clone, Default)]
pub struct CycloneDxSbom {
    /// Serialization the BOM was read from (`json`, `xml`)
    pub format: String,
    /// Raw `specVersion`, e.g. `1.5`
    pub spec_version: String,
    /// Raw `metadata.timestamp`
    pub timestamp: String,
    /// `metadata.authors` followed by `metadata.tools`
    pub creators: Vec<Identity>,
    /// `metadata.component` (if any) first, then `components`
    pub components: Vec<CycloneDxComponent>,
    /// `dependencies[].ref -> dependsOn`
    pub dependencies: IndexMap<String, Vec<String>>,
    /// bom-ref of `metadata.component`
    pub primary_ref: Option<String>,
}

/// One CycloneDX component.
#[derive(Debug, Clone, Default)]
pub struct CycloneDxComponent {
    pub bom_ref: String,
    pub name: String,
    pub version: String,
    pub supplier: Option<Identity>,
    /// `purl` and `cpe` fields as references, followed by `externalReferences`
    pub references: Vec<ExternalReference>,
}

impl CycloneDxComponent {
    /// Build a component, folding the `purl`/`cpe` identifier fields into
    /// the reference list so they are inspected like any other reference.
    pub fn new(
        bom_ref: Option<String>,
        name: String,
        version: Option<String>,
        purl: Option<String>,
        cpe: Option<String>,
    ) -> Self {
        let bom_ref = bom_ref
            .filter(|r| !r.trim().is_empty())
            .or_else(|| purl.clone().filter(|p| !p.trim().is_empty()))
            .unwrap_or_else(|| name.clone());

        let mut references = Vec::new();
        if let Some(purl) = purl.filter(|p| !p.trim().is_empty()) {
            references.push(ExternalReference::new("purl", purl));
        }
        if let Some(cpe) = cpe.filter(|c| !c.trim().is_empty()) {
            references.push(ExternalReference::new("cpe", cpe));
        }

        Self {
            bom_ref,
            name,
            version: version.unwrap_or_default(),
            supplier: None,
            references,
        }
    }
}

impl Document for CycloneDxSbom {
    fn spec_type(&self) -> &str {
        "cyclonedx"
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn spec_version(&self) -> &str {
        &self.spec_version
    }

    fn creation_timestamp(&self) -> &str {
        &self.timestamp
    }

    fn creators(&self) -> &[Identity] {
        &self.creators
    }

    fn components(&self) -> Vec<&dyn Component> {
        self.components.iter().map(|c| c as &dyn Component).collect()
    }

    fn primary_component_dependency_count(&self) -> usize {
        self.primary_ref
            .as_deref()
            .map_or(0, |r| self.dependencies_of(r).len())
    }

    fn dependencies_of(&self, component_id: &str) -> Vec<&str> {
        self.dependencies
            .get(component_id)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl Component for CycloneDxComponent {
    fn id(&self) -> &str {
        &self.bom_ref
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
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_fields_become_references() {
        let comp = CycloneDxComponent::new(
            Some("pkg-a".to_string()),
            "a".to_string(),
            Some("1.0".to_string()),
            Some("pkg:npm/a@1.0".to_string()),
            Some("cpe:2.3:a:acme:a:1.0:*:*:*:*:*:*:*".to_string()),
        );
        let kinds: Vec<&str> = comp.references.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, vec!["purl", "cpe"]);
    }

    #[test]
    fn test_bom_ref_fallbacks() {
        let by_purl = CycloneDxComponent::new(
            None,
            "a".to_string(),
            None,
            Some("pkg:npm/a@1.0".to_string()),
            None,
        );
        assert_eq!(by_purl.id(), "pkg:npm/a@1.0");

        let by_name = CycloneDxComponent::new(Some("  ".to_string()), "a".to_string(), None, None, None);
        assert_eq!(by_name.id(), "a");
        assert!(by_name.references.is_empty());
    }

    #[test]
    fn test_primary_dependency_count() {
        let mut bom = CycloneDxSbom::default();
        bom.dependencies
            .insert("root".to_string(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(bom.primary_component_dependency_count(), 0);

        bom.primary_ref = Some("root".to_string());
        assert_eq!(bom.primary_component_dependency_count(), 2);
        assert_eq!(bom.dependencies_of("root"), vec!["a", "b"]);
        assert!(bom.dependencies_of("missing").is_empty());
    }
}

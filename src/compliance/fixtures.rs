//! In-memory documents for unit tests.

use crate::model::{Component, Document, ExternalReference, Identity};
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct FakeComponent {
    pub id: String,
    pub name: String,
    pub version: String,
    pub supplier: Option<Identity>,
    pub references: Vec<ExternalReference>,
}

impl FakeComponent {
    pub fn named(name: &str) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_references(mut self, references: Vec<ExternalReference>) -> Self {
        self.references = references;
        self
    }
}

impl Component for FakeComponent {
    fn id(&self) -> &str {
        &self.id
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

#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    pub spec_type: String,
    pub format: String,
    pub spec_version: String,
    pub timestamp: String,
    pub creators: Vec<Identity>,
    pub components: Vec<FakeComponent>,
    pub dependencies: IndexMap<String, Vec<String>>,
    pub primary_dependencies: usize,
}

impl Document for FakeDocument {
    fn spec_type(&self) -> &str {
        &self.spec_type
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
        self.primary_dependencies
    }

    fn dependencies_of(&self, component_id: &str) -> Vec<&str> {
        self.dependencies
            .get(component_id)
            .map(|deps| deps.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// A document that satisfies every NTIA element.
pub fn passing_document(spec_type: &str, format: &str) -> FakeDocument {
    let tool_id = "github/spdx/tools-golang@9db247b854b9634d0109153d515fd1a9efd5a1b1";
    let gordf_id = "github/spdx/gordf@b735bd5aac89fe25cad4ef488a95bc00ea549edd";

    let component = FakeComponent {
        id: tool_id.to_string(),
        name: "tool-golang".to_string(),
        version: "v0.7.1".to_string(),
        supplier: Some(Identity::email("hello@interlynk.io")),
        references: vec![ExternalReference::new("purl", "pkg:golang/tool-golang@v0.7.1")],
    };

    let mut dependencies = IndexMap::new();
    dependencies.insert(tool_id.to_string(), vec![gordf_id.to_string()]);

    FakeDocument {
        spec_type: spec_type.to_string(),
        format: format.to_string(),
        spec_version: "SPDX-2.3".to_string(),
        timestamp: "2023-05-04T09:33:40Z".to_string(),
        creators: vec![Identity::named("syft")],
        components: vec![component],
        dependencies,
        primary_dependencies: 1,
    }
}

/// A document that misses every element it can.
pub fn failing_document() -> FakeDocument {
    FakeDocument {
        spec_type: "swid".to_string(),
        format: "fjson".to_string(),
        spec_version: "SPDX-4.0".to_string(),
        timestamp: "2023-05-04".to_string(),
        creators: vec![Identity::default()],
        components: vec![FakeComponent {
            id: "SPDXRef-empty".to_string(),
            supplier: Some(Identity::default()),
            ..FakeComponent::default()
        }],
        dependencies: IndexMap::new(),
        primary_dependencies: 0,
    }
}

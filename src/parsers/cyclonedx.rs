//! CycloneDX SBOM parser.
//!
//! Supports CycloneDX versions 1.3 through 1.6 in JSON and XML formats.

use crate::model::{CycloneDxComponent, CycloneDxSbom, Document, ExternalReference, Identity};
use crate::parsers::traits::{FormatConfidence, FormatDetection, ParseError, SbomParser};
use indexmap::IndexMap;
use serde::Deserialize;

/// Parser for CycloneDX SBOM format
#[derive(Debug, Default)]
pub struct CycloneDxParser;

impl CycloneDxParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a CycloneDX BOM from JSON
    fn parse_json(&self, content: &str) -> Result<CycloneDxSbom, ParseError> {
        let cdx: CycloneDxBom = serde_json::from_str(content)?;
        Ok(self.convert(cdx, "json"))
    }

    /// Parse a CycloneDX BOM from XML
    fn parse_xml(&self, content: &str) -> Result<CycloneDxSbom, ParseError> {
        let cdx: CycloneDxBomXml = quick_xml::de::from_str(content)?;
        Ok(self.convert(cdx.into(), "xml"))
    }

    /// Parse to the concrete CycloneDX variant instead of a trait object.
    pub fn parse_cyclonedx(&self, content: &str) -> Result<CycloneDxSbom, ParseError> {
        let trimmed = content.trim();
        if trimmed.starts_with('{') {
            self.parse_json(content)
        } else if trimmed.starts_with('<') {
            self.parse_xml(content)
        } else {
            Err(ParseError::UnknownFormat(
                "Expected JSON or XML CycloneDX format".to_string(),
            ))
        }
    }

    /// Convert the raw BOM into the CycloneDX-backed model variant
    fn convert(&self, cdx: CycloneDxBom, format: &str) -> CycloneDxSbom {
        let mut sbom = CycloneDxSbom {
            format: format.to_string(),
            spec_version: cdx.spec_version,
            ..CycloneDxSbom::default()
        };

        if let Some(meta) = cdx.metadata {
            sbom.timestamp = meta.timestamp.unwrap_or_default();

            for author in meta.authors.unwrap_or_default() {
                let identity = Identity::new(
                    author.name.unwrap_or_default(),
                    author.email.unwrap_or_default(),
                );
                if !identity.is_empty() {
                    sbom.creators.push(identity);
                }
            }
            for tool in meta.tools.unwrap_or_default() {
                if let Some(name) = tool.name.filter(|n| !n.trim().is_empty()) {
                    sbom.creators.push(Identity::named(name));
                }
            }

            if let Some(primary) = meta.component {
                let mut flattened = Vec::new();
                flatten_component(primary, &mut flattened);
                sbom.primary_ref = flattened.first().map(|c| c.bom_ref.clone());
                sbom.components.extend(flattened);
            }
        }

        let mut flattened = Vec::new();
        for comp in cdx.components.unwrap_or_default() {
            flatten_component(comp, &mut flattened);
        }
        for comp in flattened {
            let duplicate_primary = sbom.primary_ref.as_deref() == Some(comp.bom_ref.as_str());
            if duplicate_primary {
                tracing::debug!("Skipping duplicate of metadata.component: {}", comp.bom_ref);
                continue;
            }
            sbom.components.push(comp);
        }

        let mut dependencies: IndexMap<String, Vec<String>> = IndexMap::new();
        for dep in cdx.dependencies.unwrap_or_default() {
            let entry = dependencies.entry(dep.ref_field).or_default();
            for target in dep.depends_on.unwrap_or_default() {
                if !entry.contains(&target) {
                    entry.push(target);
                }
            }
        }
        sbom.dependencies = dependencies;

        sbom
    }
}

/// Depth-first flattening of nested `components`, parent before children
fn flatten_component(cdx: CdxComponent, out: &mut Vec<CycloneDxComponent>) {
    let mut comp = CycloneDxComponent::new(cdx.bom_ref, cdx.name, cdx.version, cdx.purl, cdx.cpe);

    comp.supplier = cdx.supplier.and_then(|s| {
        let email = s
            .contact
            .into_iter()
            .find_map(|c| c.email.filter(|e| !e.trim().is_empty()))
            .unwrap_or_default();
        let identity = Identity::new(s.name.unwrap_or_default(), email);
        (!identity.is_empty()).then_some(identity)
    });

    for ext_ref in cdx.external_references.unwrap_or_default() {
        comp.references
            .push(ExternalReference::new(&ext_ref.ref_type, ext_ref.url));
    }

    out.push(comp);
    for child in cdx.components.unwrap_or_default() {
        flatten_component(child, out);
    }
}

impl SbomParser for CycloneDxParser {
    fn parse_str(&self, content: &str) -> Result<Box<dyn Document>, ParseError> {
        Ok(Box::new(self.parse_cyclonedx(content)?))
    }

    fn supported_versions(&self) -> Vec<&str> {
        vec!["1.3", "1.4", "1.5", "1.6"]
    }

    fn format_name(&self) -> &str {
        "CycloneDX"
    }

    fn detect(&self, content: &str) -> FormatDetection {
        let trimmed = content.trim();

        if trimmed.starts_with('{') {
            let has_bom_format = content.contains("\"bomFormat\"");
            let has_cyclonedx = content.contains("CycloneDX") || content.contains("cyclonedx");
            let has_spec_version = content.contains("\"specVersion\"");
            let has_schema = content.contains("\"$schema\"") && content.contains("cyclonedx");

            let version =
                crate::parsers::traits::extract_quoted_value(content, "\"specVersion\"");

            if has_bom_format && has_cyclonedx {
                return FormatDetection::with_confidence(FormatConfidence::CERTAIN)
                    .variant("JSON")
                    .version_opt(version);
            } else if has_bom_format || has_schema {
                return FormatDetection::with_confidence(FormatConfidence::HIGH)
                    .variant("JSON")
                    .version_opt(version);
            } else if has_spec_version && content.contains("\"components\"") {
                return FormatDetection::with_confidence(FormatConfidence::MEDIUM)
                    .variant("JSON")
                    .warning("Missing bomFormat field - might not be CycloneDX");
            }
        }

        if trimmed.starts_with('<') {
            let has_bom_element = content.contains("<bom");
            let has_cyclonedx_ns = content.contains("cyclonedx.org");
            let version = Self::extract_xml_version(content);

            if has_bom_element && has_cyclonedx_ns {
                return FormatDetection::with_confidence(FormatConfidence::CERTAIN)
                    .variant("XML")
                    .version_opt(version);
            } else if has_bom_element {
                return FormatDetection::with_confidence(FormatConfidence::MEDIUM)
                    .variant("XML")
                    .version_opt(version)
                    .warning("Missing CycloneDX namespace");
            }
        }

        FormatDetection::no_match()
    }
}

impl CycloneDxParser {
    /// Spec version from the `xmlns` of the `<bom>` element, e.g.
    /// `http://cyclonedx.org/schema/bom/1.5`.
    fn extract_xml_version(content: &str) -> Option<String> {
        let bom_idx = content.find("<bom")?;
        let bom_part = &content[bom_idx..];
        let attrs = &bom_part[..bom_part.find('>')?];
        let ns_idx = attrs.find("cyclonedx.org/schema/bom/")?;
        let after = &attrs[ns_idx + "cyclonedx.org/schema/bom/".len()..];
        let end = after.find(|c: char| c == '"' || c == '\'')?;
        Some(after[..end].to_string())
    }
}

// CycloneDX JSON structures for deserialization. Only the fields the
// compliance checks read are modelled; serde ignores the rest.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxBom {
    #[serde(default)]
    spec_version: String,
    metadata: Option<CdxMetadata>,
    components: Option<Vec<CdxComponent>>,
    dependencies: Option<Vec<CdxDependency>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxMetadata {
    timestamp: Option<String>,
    /// Array (1.4) or object with components/services (1.5+)
    #[serde(default, deserialize_with = "deserialize_tools")]
    tools: Option<Vec<CdxTool>>,
    authors: Option<Vec<CdxContact>>,
    component: Option<CdxComponent>,
}

/// CycloneDX 1.5+ tools object format
#[derive(Debug, Deserialize)]
struct CdxToolsObject {
    components: Option<Vec<CdxTool>>,
    services: Option<Vec<CdxTool>>,
}

#[derive(Debug, Deserialize)]
struct CdxTool {
    name: Option<String>,
}

/// Authors and supplier contacts share this shape
#[derive(Debug, Deserialize)]
struct CdxContact {
    name: Option<String>,
    email: Option<String>,
}

/// Custom deserializer to handle both the array and object tool formats
fn deserialize_tools<'de, D>(deserializer: D) -> Result<Option<Vec<CdxTool>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct ToolsVisitor;

    impl<'de> Visitor<'de> for ToolsVisitor {
        type Value = Option<Vec<CdxTool>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an array of tools or an object with components/services")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut tools = Vec::new();
            while let Some(tool) = seq.next_element::<CdxTool>()? {
                tools.push(tool);
            }
            Ok(Some(tools))
        }

        fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let tools_obj: CdxToolsObject =
                serde::Deserialize::deserialize(de::value::MapAccessDeserializer::new(map))?;

            let tools: Vec<CdxTool> = tools_obj
                .components
                .into_iter()
                .flatten()
                .chain(tools_obj.services.into_iter().flatten())
                .collect();

            Ok(if tools.is_empty() { None } else { Some(tools) })
        }
    }

    deserializer.deserialize_any(ToolsVisitor)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponent {
    #[serde(rename = "bom-ref", alias = "bomRef")]
    bom_ref: Option<String>,
    #[serde(default)]
    name: String,
    version: Option<String>,
    purl: Option<String>,
    cpe: Option<String>,
    supplier: Option<CdxSupplier>,
    external_references: Option<Vec<CdxExternalReference>>,
    components: Option<Vec<CdxComponent>>,
}

#[derive(Debug, Deserialize)]
struct CdxSupplier {
    name: Option<String>,
    #[serde(default)]
    contact: Vec<CdxContact>,
}

#[derive(Debug, Deserialize)]
struct CdxExternalReference {
    #[serde(rename = "type")]
    ref_type: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxDependency {
    #[serde(rename = "ref")]
    ref_field: String,
    depends_on: Option<Vec<String>>,
}

// CycloneDX XML structures for deserialization.
// XML uses wrapper elements for collections (e.g., <components><component>...)

#[derive(Debug, Deserialize)]
#[serde(rename = "bom")]
struct CycloneDxBomXml {
    /// Namespace carries the schema version
    #[serde(rename = "@xmlns", default)]
    xmlns: String,
    metadata: Option<CdxMetadataXml>,
    components: Option<CdxComponentsXml>,
    dependencies: Option<CdxDependenciesXml>,
}

#[derive(Debug, Deserialize)]
struct CdxMetadataXml {
    timestamp: Option<String>,
    tools: Option<CdxToolsXml>,
    authors: Option<CdxAuthorsXml>,
    component: Option<CdxComponentXml>,
}

/// `<tool>` elements (1.4) or `<components>`/`<services>` (1.5+)
#[derive(Debug, Deserialize)]
struct CdxToolsXml {
    #[serde(default)]
    tool: Vec<CdxTool>,
    components: Option<CdxToolComponentsXml>,
    services: Option<CdxToolServicesXml>,
}

#[derive(Debug, Deserialize)]
struct CdxToolComponentsXml {
    #[serde(default)]
    component: Vec<CdxTool>,
}

#[derive(Debug, Deserialize)]
struct CdxToolServicesXml {
    #[serde(default)]
    service: Vec<CdxTool>,
}

#[derive(Debug, Deserialize)]
struct CdxAuthorsXml {
    #[serde(default)]
    author: Vec<CdxContact>,
}

#[derive(Debug, Deserialize)]
struct CdxComponentsXml {
    #[serde(default)]
    component: Vec<CdxComponentXml>,
}

#[derive(Debug, Deserialize)]
struct CdxComponentXml {
    #[serde(rename = "@bom-ref")]
    bom_ref: Option<String>,
    #[serde(default)]
    name: String,
    version: Option<String>,
    purl: Option<String>,
    cpe: Option<String>,
    supplier: Option<CdxSupplier>,
    #[serde(rename = "externalReferences")]
    external_references: Option<CdxExternalReferencesXml>,
    components: Option<CdxComponentsXml>,
}

#[derive(Debug, Deserialize)]
struct CdxExternalReferencesXml {
    #[serde(default)]
    reference: Vec<CdxExternalReferenceXml>,
}

#[derive(Debug, Deserialize)]
struct CdxExternalReferenceXml {
    #[serde(rename = "@type")]
    ref_type: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct CdxDependenciesXml {
    #[serde(default)]
    dependency: Vec<CdxDependencyXml>,
}

/// `<dependency ref="a"><dependency ref="b"/></dependency>`
#[derive(Debug, Deserialize)]
struct CdxDependencyXml {
    #[serde(rename = "@ref")]
    ref_field: String,
    #[serde(default)]
    dependency: Vec<CdxDependencyXml>,
}

impl From<CycloneDxBomXml> for CycloneDxBom {
    fn from(xml: CycloneDxBomXml) -> Self {
        let spec_version = xml
            .xmlns
            .rsplit('/')
            .next()
            .filter(|v| v.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .unwrap_or_default()
            .to_string();

        Self {
            spec_version,
            metadata: xml.metadata.map(|m| CdxMetadata {
                timestamp: m.timestamp,
                tools: m.tools.map(|t| {
                    t.tool
                        .into_iter()
                        .chain(t.components.into_iter().flat_map(|c| c.component))
                        .chain(t.services.into_iter().flat_map(|s| s.service))
                        .collect()
                }),
                authors: m.authors.map(|a| a.author),
                component: m.component.map(CdxComponent::from),
            }),
            components: xml
                .components
                .map(|c| c.component.into_iter().map(CdxComponent::from).collect()),
            dependencies: xml.dependencies.map(|d| {
                d.dependency
                    .into_iter()
                    .map(|dep| CdxDependency {
                        ref_field: dep.ref_field,
                        depends_on: Some(dep.dependency.into_iter().map(|d| d.ref_field).collect()),
                    })
                    .collect()
            }),
        }
    }
}

impl From<CdxComponentXml> for CdxComponent {
    fn from(xml: CdxComponentXml) -> Self {
        Self {
            bom_ref: xml.bom_ref,
            name: xml.name,
            version: xml.version,
            purl: xml.purl,
            cpe: xml.cpe,
            supplier: xml.supplier,
            external_references: xml.external_references.map(|r| {
                r.reference
                    .into_iter()
                    .map(|r| CdxExternalReference {
                        ref_type: r.ref_type,
                        url: r.url,
                    })
                    .collect()
            }),
            components: xml
                .components
                .map(|c| c.component.into_iter().map(Self::from).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    const JSON_BOM: &str = r#"{
        "bomFormat": "CycloneDX",
        "specVersion": "1.5",
        "metadata": {
            "timestamp": "2023-05-04T09:33:40Z",
            "authors": [{"name": "Jane", "email": "jane@example.com"}],
            "tools": {"components": [{"type": "application", "name": "cdxgen"}]},
            "component": {"bom-ref": "pkg:npm/app@1.0", "type": "application", "name": "app", "version": "1.0"}
        },
        "components": [
            {
                "bom-ref": "pkg:npm/lib@2.0",
                "type": "library",
                "name": "lib",
                "version": "2.0",
                "purl": "pkg:npm/lib@2.0",
                "supplier": {"name": "Acme", "contact": [{"email": "ops@acme.io"}]},
                "externalReferences": [{"type": "website", "url": "https://acme.io"}],
                "components": [{"type": "library", "name": "nested"}]
            }
        ],
        "dependencies": [
            {"ref": "pkg:npm/app@1.0", "dependsOn": ["pkg:npm/lib@2.0"]},
            {"ref": "pkg:npm/lib@2.0", "dependsOn": []}
        ]
    }"#;

    #[test]
    fn test_parse_json() {
        let bom = CycloneDxParser::new().parse_cyclonedx(JSON_BOM).unwrap();
        assert_eq!(bom.format, "json");
        assert_eq!(bom.spec_version, "1.5");
        assert_eq!(bom.timestamp, "2023-05-04T09:33:40Z");

        let creators: Vec<&str> = bom.creators.iter().map(Identity::display_value).collect();
        assert_eq!(creators, vec!["Jane", "cdxgen"]);

        let ids: Vec<&str> = bom.components.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["pkg:npm/app@1.0", "pkg:npm/lib@2.0", "nested"]);

        let lib = &bom.components[1];
        let supplier = lib.supplier().unwrap();
        assert_eq!(supplier.name, "Acme");
        assert_eq!(supplier.email, "ops@acme.io");
        let kinds: Vec<&str> = lib.references.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, vec!["purl", "website"]);

        assert_eq!(bom.primary_ref.as_deref(), Some("pkg:npm/app@1.0"));
        assert_eq!(bom.primary_component_dependency_count(), 1);
    }

    #[test]
    fn test_tools_array_form() {
        let content = r#"{
            "bomFormat": "CycloneDX",
            "specVersion": "1.4",
            "metadata": {"tools": [{"vendor": "x", "name": "syft", "version": "0.80"}]}
        }"#;
        let bom = CycloneDxParser::new().parse_cyclonedx(content).unwrap();
        assert_eq!(bom.creators, vec![Identity::named("syft")]);
        assert!(bom.components.is_empty());
        assert_eq!(bom.primary_component_dependency_count(), 0);
    }

    #[test]
    fn test_parse_xml() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" version="1">
  <metadata>
    <timestamp>2023-05-04T09:33:40Z</timestamp>
    <tools><tool><vendor>anchore</vendor><name>syft</name></tool></tools>
    <component bom-ref="app" type="application"><name>app</name></component>
  </metadata>
  <components>
    <component bom-ref="lib" type="library">
      <supplier><name>Acme</name></supplier>
      <name>lib</name>
      <version>2.0</version>
      <cpe>cpe:2.3:a:acme:lib:2.0:*:*:*:*:*:*:*</cpe>
    </component>
  </components>
  <dependencies>
    <dependency ref="app"><dependency ref="lib"/></dependency>
  </dependencies>
</bom>"#;
        let parser = CycloneDxParser::new();
        let detection = parser.detect(content);
        assert_eq!(detection.confidence, FormatConfidence::CERTAIN);
        assert_eq!(detection.version.as_deref(), Some("1.4"));

        let bom = parser.parse_cyclonedx(content).unwrap();
        assert_eq!(bom.format, "xml");
        assert_eq!(bom.spec_version, "1.4");
        assert_eq!(bom.creators, vec![Identity::named("syft")]);
        assert_eq!(bom.components.len(), 2);
        assert_eq!(bom.components[1].version(), "2.0");
        assert_eq!(bom.components[1].references[0].kind, "cpe");
        assert_eq!(bom.dependencies_of("app"), vec!["lib"]);
    }

    #[test]
    fn test_detect_json() {
        let detection = CycloneDxParser::new()
            .detect(r#"{"bomFormat": "CycloneDX", "specVersion": "1.6"}"#);
        assert_eq!(detection.confidence, FormatConfidence::CERTAIN);
        assert_eq!(detection.version.as_deref(), Some("1.6"));
    }

    #[test]
    fn test_detect_rejects_spdx() {
        let detection = CycloneDxParser::new()
            .detect(r#"{"spdxVersion": "SPDX-2.3", "SPDXID": "SPDXRef-DOCUMENT"}"#);
        assert_eq!(detection.confidence, FormatConfidence::NONE);
    }
}

//! SPDX SBOM parser.
//!
//! Supports SPDX versions 2.2 and 2.3 in JSON, YAML, and tag-value formats.

use crate::model::{
    Document, ExternalReference, Identity, SpdxComponent, SpdxRelationship, SpdxSbom,
};
use crate::parsers::traits::{
    extract_quoted_value, FormatConfidence, FormatDetection, ParseError, SbomParser,
};
use serde::Deserialize;

const DOCUMENT_SPDX_ID: &str = "SPDXRef-DOCUMENT";

/// Parser for SPDX SBOM format
#[derive(Debug, Default)]
pub struct SpdxParser;

impl SpdxParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse SPDX JSON format
    fn parse_json(&self, content: &str) -> Result<SpdxSbom, ParseError> {
        let spdx: SpdxDocument = serde_json::from_str(content)?;
        Ok(self.convert(spdx, "json"))
    }

    /// Parse SPDX YAML format (same schema as JSON)
    fn parse_yaml(&self, content: &str) -> Result<SpdxSbom, ParseError> {
        let spdx: SpdxDocument = serde_yaml_ng::from_str(content)?;
        Ok(self.convert(spdx, "yaml"))
    }

    /// Parse SPDX tag-value format
    fn parse_tag_value(&self, content: &str) -> Result<SpdxSbom, ParseError> {
        let spdx = self.parse_tag_value_format(content)?;
        Ok(self.convert(spdx, "tag-value"))
    }

    /// Parse tag-value lines into the same raw structure the JSON path uses
    fn parse_tag_value_format(&self, content: &str) -> Result<SpdxDocument, ParseError> {
        let mut doc = SpdxDocument::default();
        let mut creation_info = SpdxCreationInfo::default();
        let mut current_package: Option<SpdxPackage> = None;
        // Set once a file, snippet or license section starts; their SPDXID
        // lines belong to neither the document nor a package.
        let mut in_other_section = false;
        let mut packages = Vec::new();
        let mut relationships = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "SPDXVersion" => doc.spdx_version = value.to_string(),
                "SPDXID" => match current_package.as_mut() {
                    Some(pkg) => pkg.spdx_id = value.to_string(),
                    None if !in_other_section => doc.spdx_id = value.to_string(),
                    None => {}
                },
                "FileName" | "SnippetSPDXID" | "LicenseID" => {
                    if let Some(pkg) = current_package.take() {
                        packages.push(pkg);
                    }
                    in_other_section = true;
                }
                "DocumentName" => doc.name = value.to_string(),
                "Creator" => creation_info.creators.push(value.to_string()),
                "Created" => creation_info.created = Some(value.to_string()),
                "PackageName" => {
                    if let Some(pkg) = current_package.take() {
                        packages.push(pkg);
                    }
                    in_other_section = false;
                    current_package = Some(SpdxPackage {
                        name: value.to_string(),
                        ..SpdxPackage::default()
                    });
                }
                "PackageVersion" => {
                    if let Some(pkg) = current_package.as_mut() {
                        pkg.version_info = Some(value.to_string());
                    }
                }
                "PackageSupplier" => {
                    if let Some(pkg) = current_package.as_mut() {
                        pkg.supplier = Some(value.to_string());
                    }
                }
                "ExternalRef" => {
                    if let Some(pkg) = current_package.as_mut() {
                        if let Some(ext_ref) = parse_external_ref_line(value) {
                            pkg.external_refs.push(ext_ref);
                        }
                    }
                }
                "Relationship" => {
                    if let Some(rel) = parse_relationship_line(value) {
                        relationships.push(rel);
                    }
                }
                _ => {}
            }
        }

        if let Some(pkg) = current_package {
            packages.push(pkg);
        }

        if doc.spdx_version.is_empty() {
            return Err(ParseError::MissingField("SPDXVersion".to_string()));
        }

        doc.creation_info = Some(creation_info);
        doc.packages = packages;
        doc.relationships = relationships;
        Ok(doc)
    }

    /// Convert the raw document into the SPDX-backed model variant
    fn convert(&self, spdx: SpdxDocument, format: &str) -> SpdxSbom {
        let (created, creators) = spdx.creation_info.map_or_else(
            || (String::new(), Vec::new()),
            |info| {
                let creators = info
                    .creators
                    .iter()
                    .filter_map(|c| Identity::from_spdx_actor(c))
                    .collect();
                (info.created.unwrap_or_default(), creators)
            },
        );

        let packages = spdx
            .packages
            .into_iter()
            .map(|pkg| SpdxComponent {
                spdx_id: pkg.spdx_id,
                name: pkg.name,
                version: pkg.version_info.unwrap_or_default(),
                supplier: pkg.supplier.as_deref().and_then(Identity::from_spdx_actor),
                external_refs: pkg
                    .external_refs
                    .into_iter()
                    .map(|r| ExternalReference::new(&r.reference_type, r.reference_locator))
                    .collect(),
            })
            .collect();

        let relationships: Vec<SpdxRelationship> = spdx
            .relationships
            .iter()
            .filter(|r| !r.spdx_element_id.is_empty() && !r.related_spdx_element.is_empty())
            .map(|r| {
                SpdxRelationship::new(&r.spdx_element_id, &r.relationship_type, &r.related_spdx_element)
            })
            .collect();

        let document_id = if spdx.spdx_id.is_empty() {
            DOCUMENT_SPDX_ID
        } else {
            spdx.spdx_id.as_str()
        };
        let primary_id = relationships
            .iter()
            .find(|r| r.relationship_type == "DESCRIBES" && r.element == document_id)
            .map(|r| r.related.clone())
            .or_else(|| spdx.document_describes.first().cloned());

        let mut sbom = SpdxSbom {
            format: format.to_string(),
            spec_version: spdx.spdx_version,
            created,
            creators,
            packages,
            primary_id,
            ..SpdxSbom::default()
        };
        for relationship in &relationships {
            sbom.add_relationship(relationship);
        }
        sbom
    }

    /// Parse to the concrete SPDX variant instead of a trait object.
    pub fn parse_spdx(&self, content: &str) -> Result<SpdxSbom, ParseError> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') {
            self.parse_json(content)
        } else if is_tag_value(content) {
            self.parse_tag_value(content)
        } else if is_yaml(content) {
            self.parse_yaml(content)
        } else {
            Err(ParseError::UnknownFormat(
                "Expected JSON, YAML, or tag-value SPDX format".to_string(),
            ))
        }
    }
}

fn is_tag_value(content: &str) -> bool {
    content.trim_start().starts_with("SPDXVersion:") || content.contains("\nSPDXVersion:")
}

fn is_yaml(content: &str) -> bool {
    content.trim_start().starts_with("spdxVersion:") || content.contains("\nspdxVersion:")
}

/// `ExternalRef: <category> <type> <locator>`
fn parse_external_ref_line(value: &str) -> Option<SpdxExternalRef> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() >= 3 {
        Some(SpdxExternalRef {
            reference_category: parts[0].to_string(),
            reference_type: parts[1].to_string(),
            reference_locator: parts[2].to_string(),
        })
    } else {
        None
    }
}

/// `Relationship: <element> <type> <related>`
fn parse_relationship_line(value: &str) -> Option<SpdxRelationshipRaw> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() >= 3 {
        Some(SpdxRelationshipRaw {
            spdx_element_id: parts[0].to_string(),
            relationship_type: parts[1].to_string(),
            related_spdx_element: parts[2].to_string(),
        })
    } else {
        None
    }
}

impl SbomParser for SpdxParser {
    fn parse_str(&self, content: &str) -> Result<Box<dyn Document>, ParseError> {
        Ok(Box::new(self.parse_spdx(content)?))
    }

    fn supported_versions(&self) -> Vec<&str> {
        vec!["2.2", "2.3"]
    }

    fn format_name(&self) -> &str {
        "SPDX"
    }

    fn detect(&self, content: &str) -> FormatDetection {
        let trimmed = content.trim();

        if trimmed.starts_with('{') {
            let has_spdx_version = content.contains("\"spdxVersion\"");
            let has_spdx_id = content.contains("\"SPDXID\"");
            let has_data_license = content.contains("\"dataLicense\"");
            let has_packages = content.contains("\"packages\"");
            let version = extract_quoted_value(content, "\"spdxVersion\"").map(strip_spdx_prefix);

            if has_spdx_version && has_spdx_id {
                return FormatDetection::with_confidence(FormatConfidence::CERTAIN)
                    .variant("JSON")
                    .version_opt(version);
            } else if has_spdx_version || (has_spdx_id && has_data_license) {
                return FormatDetection::with_confidence(FormatConfidence::HIGH)
                    .variant("JSON")
                    .version_opt(version);
            } else if has_packages && has_data_license {
                return FormatDetection::with_confidence(FormatConfidence::MEDIUM)
                    .variant("JSON")
                    .warning("Missing spdxVersion field");
            }
        }

        if is_tag_value(content) {
            let version = line_value(content, "SPDXVersion:").map(strip_spdx_prefix);
            let confidence = if content.contains("SPDXID:") && content.contains("DataLicense:") {
                FormatConfidence::CERTAIN
            } else {
                FormatConfidence::HIGH
            };
            return FormatDetection::with_confidence(confidence)
                .variant("tag-value")
                .version_opt(version);
        }

        if is_yaml(content) {
            let version = line_value(content, "spdxVersion:").map(strip_spdx_prefix);
            return FormatDetection::with_confidence(FormatConfidence::HIGH)
                .variant("YAML")
                .version_opt(version);
        }

        FormatDetection::no_match()
    }
}

/// Value of the first line starting with `tag`, quotes removed
fn line_value(content: &str, tag: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.trim_start().strip_prefix(tag))
        .map(|rest| rest.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
}

fn strip_spdx_prefix(version: String) -> String {
    version
        .strip_prefix("SPDX-")
        .map_or_else(|| version.clone(), str::to_string)
}

// SPDX JSON/YAML structures for deserialization. Everything except the
// version is optional so incomplete documents still score (low).

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument {
    spdx_version: String,
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    #[serde(default)]
    name: String,
    creation_info: Option<SpdxCreationInfo>,
    #[serde(default)]
    packages: Vec<SpdxPackage>,
    #[serde(default)]
    relationships: Vec<SpdxRelationshipRaw>,
    #[serde(default)]
    document_describes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxCreationInfo {
    created: Option<String>,
    #[serde(default)]
    creators: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    #[serde(rename = "SPDXID", default)]
    spdx_id: String,
    #[serde(default)]
    name: String,
    version_info: Option<String>,
    supplier: Option<String>,
    #[serde(default)]
    external_refs: Vec<SpdxExternalRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SpdxExternalRef {
    #[allow(dead_code)]
    reference_category: String,
    reference_type: String,
    reference_locator: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SpdxRelationshipRaw {
    spdx_element_id: String,
    relationship_type: String,
    related_spdx_element: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    const TAG_VALUE: &str = "\
SPDXVersion: SPDX-2.3
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: sample
Creator: Tool: syft-0.80.0
Creator: Organization: Interlynk (hello@interlynk.io)
Created: 2023-05-04T09:33:40Z

PackageName: tool-golang
SPDXID: SPDXRef-Package-tool
PackageVersion: v0.7.1
PackageSupplier: Organization: Interlynk (hello@interlynk.io)
ExternalRef: PACKAGE-MANAGER purl pkg:golang/tool-golang@v0.7.1

PackageName: gordf
SPDXID: SPDXRef-Package-gordf
PackageSupplier: NOASSERTION

Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package-tool
Relationship: SPDXRef-Package-tool DEPENDS_ON SPDXRef-Package-gordf
";

    #[test]
    fn test_parse_tag_value() {
        let doc = SpdxParser::new().parse_spdx(TAG_VALUE).unwrap();
        assert_eq!(doc.format, "tag-value");
        assert_eq!(doc.spec_version, "SPDX-2.3");
        assert_eq!(doc.created, "2023-05-04T09:33:40Z");
        assert_eq!(doc.creators.len(), 2);
        assert_eq!(doc.creators[0].display_value(), "syft-0.80.0");
        assert_eq!(doc.creators[1].email, "hello@interlynk.io");

        assert_eq!(doc.packages.len(), 2);
        let tool = &doc.packages[0];
        assert_eq!(tool.id(), "SPDXRef-Package-tool");
        assert_eq!(tool.version(), "v0.7.1");
        assert_eq!(tool.external_references()[0].kind, "purl");
        assert!(doc.packages[1].supplier().is_none());

        assert_eq!(doc.primary_id.as_deref(), Some("SPDXRef-Package-tool"));
        assert_eq!(doc.primary_component_dependency_count(), 1);
    }

    #[test]
    fn test_file_section_does_not_rename_package() {
        let content = "\
SPDXVersion: SPDX-2.3
SPDXID: SPDXRef-DOCUMENT

PackageName: app
SPDXID: SPDXRef-Package-app
PackageVersion: 1.0

FileName: ./main.go
SPDXID: SPDXRef-File-main
FileChecksum: SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c

PackageName: lib
SPDXID: SPDXRef-Package-lib

Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-Package-app
Relationship: SPDXRef-Package-app DEPENDS_ON SPDXRef-Package-lib
";
        let doc = SpdxParser::new().parse_spdx(content).unwrap();
        let ids: Vec<&str> = doc.packages.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["SPDXRef-Package-app", "SPDXRef-Package-lib"]);
        assert_eq!(doc.packages[0].version(), "1.0");
        assert_eq!(doc.dependencies_of("SPDXRef-Package-app"), vec!["SPDXRef-Package-lib"]);
        assert_eq!(doc.primary_component_dependency_count(), 1);
    }

    #[test]
    fn test_tags_after_file_section_are_not_package_tags() {
        let content = "\
SPDXVersion: SPDX-2.3
PackageName: app
SPDXID: SPDXRef-app
FileName: ./a.c
SPDXID: SPDXRef-File-a
PackageVersion: 9.9
";
        let doc = SpdxParser::new().parse_spdx(content).unwrap();
        assert_eq!(doc.packages.len(), 1);
        assert_eq!(doc.packages[0].id(), "SPDXRef-app");
        assert!(doc.packages[0].version().is_empty());
    }

    #[test]
    fn test_malformed_refs_and_relationships_still_parse() {
        let content = r#"{
            "spdxVersion": "SPDX-2.3",
            "SPDXID": "SPDXRef-DOCUMENT",
            "packages": [
                {"SPDXID": "SPDXRef-a", "name": "a",
                 "externalRefs": [{"referenceType": "purl", "referenceLocator": "pkg:npm/a@1"}]}
            ],
            "relationships": [
                {"spdxElementId": "SPDXRef-a", "relationshipType": "DEPENDS_ON"},
                {"spdxElementId": "SPDXRef-a", "relationshipType": "DEPENDS_ON",
                 "relatedSpdxElement": "SPDXRef-b"}
            ]
        }"#;
        let doc = SpdxParser::new().parse_spdx(content).unwrap();
        assert_eq!(doc.packages[0].external_refs[0].kind, "purl");
        assert_eq!(doc.dependencies_of("SPDXRef-a"), vec!["SPDXRef-b"]);
    }

    #[test]
    fn test_parse_json_document_describes() {
        let content = r#"{
            "spdxVersion": "SPDX-2.2",
            "SPDXID": "SPDXRef-DOCUMENT",
            "documentDescribes": ["SPDXRef-root"],
            "packages": [
                {"SPDXID": "SPDXRef-root", "name": "root",
                 "externalRefs": [{"referenceCategory": "SECURITY", "referenceType": "cpe23Type",
                                   "referenceLocator": "cpe:2.3:a:acme:root:1:*:*:*:*:*:*:*"}]}
            ]
        }"#;
        let doc = SpdxParser::new().parse_spdx(content).unwrap();
        assert_eq!(doc.format, "json");
        assert_eq!(doc.primary_id.as_deref(), Some("SPDXRef-root"));
        assert_eq!(doc.packages[0].external_refs[0].kind, "cpe");
        assert!(doc.created.is_empty());
        assert!(doc.creators.is_empty());
    }

    #[test]
    fn test_parse_yaml() {
        let content = "\
spdxVersion: SPDX-2.3
SPDXID: SPDXRef-DOCUMENT
creationInfo:
  created: '2023-05-04T09:33:40Z'
  creators:
    - 'Tool: syft'
packages:
  - SPDXID: SPDXRef-a
    name: a
    versionInfo: '1.0'
";
        let parser = SpdxParser::new();
        let detection = parser.detect(content);
        assert_eq!(detection.variant.as_deref(), Some("YAML"));
        assert_eq!(detection.version.as_deref(), Some("2.3"));

        let doc = parser.parse_spdx(content).unwrap();
        assert_eq!(doc.format, "yaml");
        assert_eq!(doc.creators[0].name, "syft");
        assert_eq!(doc.packages[0].version, "1.0");
    }

    #[test]
    fn test_detect_tag_value() {
        let detection = SpdxParser::new().detect(TAG_VALUE);
        assert_eq!(detection.confidence, FormatConfidence::CERTAIN);
        assert_eq!(detection.variant.as_deref(), Some("tag-value"));
        assert_eq!(detection.version.as_deref(), Some("2.3"));
    }

    #[test]
    fn test_tag_value_without_version_is_rejected() {
        let parser = SpdxParser::new();
        let result = parser.parse_tag_value_format("PackageName: a\n");
        assert!(matches!(result, Err(ParseError::MissingField(_))));
    }

    #[test]
    fn test_unknown_content() {
        let result = SpdxParser::new().parse_spdx("<rdf:RDF/>");
        assert!(matches!(result, Err(ParseError::UnknownFormat(_))));
    }
}

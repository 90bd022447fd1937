//! SBOM parsing stage.

use crate::model::Document;
use anyhow::{Context, Result};
use std::path::Path;

/// A parsed SBOM together with the name it is reported under
pub struct ParsedDocument {
    /// The format-specific document
    pub document: Box<dyn Document>,
    /// File name as given on the command line
    pub file_name: String,
}

impl ParsedDocument {
    #[must_use]
    pub fn new(document: Box<dyn Document>, file_name: impl Into<String>) -> Self {
        Self {
            document,
            file_name: file_name.into(),
        }
    }

    /// Get a reference to the document
    #[must_use]
    pub fn document(&self) -> &dyn Document {
        self.document.as_ref()
    }
}

impl std::fmt::Debug for ParsedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedDocument")
            .field("file_name", &self.file_name)
            .field("spec_type", &self.document.spec_type())
            .field("format", &self.document.format())
            .finish_non_exhaustive()
    }
}

/// Parse an SBOM with context for error messages
pub fn parse_sbom_with_context(path: &Path, quiet: bool) -> Result<ParsedDocument> {
    if !quiet {
        tracing::info!("Parsing SBOM: {:?}", path);
    }

    let document = crate::parsers::parse_sbom(path)
        .with_context(|| format!("Failed to parse SBOM: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Parsed {} {} document with {} components",
            document.spec_type(),
            document.format(),
            document.components().len()
        );
    }

    Ok(ParsedDocument::new(document, path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SPDX_TAG_VALUE: &str = "SPDXVersion: SPDX-2.3\nDataLicense: CC0-1.0\nSPDXID: SPDXRef-DOCUMENT\nDocumentName: demo\nCreator: Tool: demo\nCreated: 2024-01-01T00:00:00Z\n\nPackageName: demo\nSPDXID: SPDXRef-demo\nPackageVersion: 1.0\n";

    #[test]
    fn test_parse_with_context() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("demo.spdx");
        std::fs::write(&path, SPDX_TAG_VALUE).unwrap();

        let parsed = parse_sbom_with_context(&path, true).unwrap();
        assert_eq!(parsed.document().spec_type(), "spdx");
        assert_eq!(parsed.document().components().len(), 1);
        assert!(parsed.file_name.ends_with("demo.spdx"));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("garbage.txt");
        std::fs::write(&path, "not an sbom").unwrap();

        let err = parse_sbom_with_context(&path, true).unwrap_err();
        assert!(format!("{err:#}").contains("garbage.txt"));
    }
}

//! Centralized format detection for SBOM parsers.
//!
//! Every entry point (file, string, fuzz target) goes through
//! [`FormatDetector`] so confidence thresholds stay consistent.

use super::traits::{FormatConfidence, FormatDetection, ParseError, SbomParser};
use super::{CycloneDxParser, SpdxParser};
use crate::model::Document;

/// Minimum confidence for accepting a detection (LOW).
pub const MIN_CONFIDENCE_THRESHOLD: f32 = 0.25;

/// Parser identified during detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    CycloneDx,
    Spdx,
}

impl ParserKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CycloneDx => "CycloneDX",
            Self::Spdx => "SPDX",
        }
    }
}

/// Result of format detection.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// The parser that should handle this content, if detected.
    pub parser: Option<ParserKind>,
    pub confidence: FormatConfidence,
    /// Detected format variant (e.g., "JSON", "XML", "tag-value").
    pub variant: Option<String>,
    pub version: Option<String>,
    pub warnings: Vec<String>,
}

impl DetectionResult {
    pub fn unknown(reason: &str) -> Self {
        Self {
            parser: None,
            confidence: FormatConfidence::NONE,
            variant: None,
            version: None,
            warnings: vec![reason.to_string()],
        }
    }

    fn from_detection(parser: ParserKind, detection: FormatDetection) -> Self {
        Self {
            parser: Some(parser),
            confidence: detection.confidence,
            variant: detection.variant,
            version: detection.version,
            warnings: detection.warnings,
        }
    }

    /// Check if the detection is confident enough to parse.
    pub fn can_parse(&self) -> bool {
        self.parser.is_some() && self.confidence.value() >= MIN_CONFIDENCE_THRESHOLD
    }
}

/// Picks the parser for a piece of SBOM content.
pub struct FormatDetector {
    cyclonedx: CycloneDxParser,
    spdx: SpdxParser,
    min_confidence: f32,
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatDetector {
    pub fn new() -> Self {
        Self::with_threshold(MIN_CONFIDENCE_THRESHOLD)
    }

    /// Create a detector with a custom confidence threshold.
    pub fn with_threshold(min_confidence: f32) -> Self {
        Self {
            cyclonedx: CycloneDxParser::new(),
            spdx: SpdxParser::new(),
            min_confidence: min_confidence.clamp(0.0, 1.0),
        }
    }

    pub fn detect_from_content(&self, content: &str) -> DetectionResult {
        if content.trim().is_empty() {
            return DetectionResult::unknown("Empty content");
        }
        let cdx_detection = self.cyclonedx.detect(content);
        let spdx_detection = self.spdx.detect(content);

        self.select_best_parser(cdx_detection, spdx_detection)
    }

    /// Select the best parser; never defaults to one when both are unsure.
    fn select_best_parser(
        &self,
        cdx_detection: FormatDetection,
        spdx_detection: FormatDetection,
    ) -> DetectionResult {
        let cdx_conf = cdx_detection.confidence.value();
        let spdx_conf = spdx_detection.confidence.value();

        tracing::debug!(
            "Format detection: CycloneDX={:.2}, SPDX={:.2}, threshold={:.2}",
            cdx_conf,
            spdx_conf,
            self.min_confidence
        );

        if cdx_conf >= self.min_confidence && cdx_conf > spdx_conf {
            DetectionResult::from_detection(ParserKind::CycloneDx, cdx_detection)
        } else if spdx_conf >= self.min_confidence {
            DetectionResult::from_detection(ParserKind::Spdx, spdx_detection)
        } else {
            let mut result =
                DetectionResult::unknown("Could not detect SBOM format with sufficient confidence");

            if cdx_conf > 0.0 {
                result.warnings.push(format!(
                    "CycloneDX detection: {:.0}% confidence (threshold: {:.0}%)",
                    cdx_conf * 100.0,
                    self.min_confidence * 100.0
                ));
            }
            if spdx_conf > 0.0 {
                result.warnings.push(format!(
                    "SPDX detection: {:.0}% confidence (threshold: {:.0}%)",
                    spdx_conf * 100.0,
                    self.min_confidence * 100.0
                ));
            }

            result
        }
    }

    /// Detect and parse in a single operation.
    pub fn parse_str(&self, content: &str) -> Result<Box<dyn Document>, ParseError> {
        let detection = self.detect_from_content(content);

        for warning in &detection.warnings {
            tracing::warn!("{}", warning);
        }

        match detection.parser {
            Some(ParserKind::CycloneDx) if detection.can_parse() => {
                self.cyclonedx.parse_str(content)
            }
            Some(ParserKind::Spdx) if detection.can_parse() => self.spdx.parse_str(content),
            _ => Err(ParseError::UnknownFormat(
                "Could not detect SBOM format. Expected CycloneDX or SPDX.".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_cyclonedx_json() {
        let detector = FormatDetector::new();
        let content = r#"{"bomFormat": "CycloneDX", "specVersion": "1.5"}"#;
        let result = detector.detect_from_content(content);

        assert_eq!(result.parser, Some(ParserKind::CycloneDx));
        assert!(result.can_parse());
        assert_eq!(result.variant, Some("JSON".to_string()));
    }

    #[test]
    fn test_detect_spdx_json() {
        let detector = FormatDetector::new();
        let content = r#"{"spdxVersion": "SPDX-2.3", "SPDXID": "SPDXRef-DOCUMENT"}"#;
        let result = detector.detect_from_content(content);

        assert_eq!(result.parser, Some(ParserKind::Spdx));
        assert!(result.can_parse());
    }

    #[test]
    fn test_no_default_bias() {
        let detector = FormatDetector::new();
        let result = detector.detect_from_content(r#"{"data": "test"}"#);

        assert!(result.parser.is_none());
        assert!(!result.can_parse());
    }

    #[test]
    fn test_empty_content() {
        let result = FormatDetector::new().detect_from_content("   \n");
        assert!(result.parser.is_none());
        assert_eq!(result.warnings, vec!["Empty content".to_string()]);
    }

    #[test]
    fn test_parse_unknown_is_error() {
        let result = FormatDetector::new().parse_str("hello world");
        assert!(matches!(result, Err(ParseError::UnknownFormat(_))));
    }

    #[test]
    fn test_parse_returns_document() {
        let content = r#"{"bomFormat": "CycloneDX", "specVersion": "1.5", "components": []}"#;
        let doc = FormatDetector::new().parse_str(content).unwrap();
        assert_eq!(doc.spec_type(), "cyclonedx");
        assert_eq!(doc.format(), "json");
    }
}

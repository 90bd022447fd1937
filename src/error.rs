//! Unified error types for sbom-compliance.
//!
//! Missing SBOM data is never an error here: checks encode it as a zero
//! score. The variants below cover the outer shell (reading, parsing,
//! rendering) and static-table validation.

use crate::parsers::ParseError;
use crate::reports::ReportError;
use thiserror::Error;

/// Main error type for sbom-compliance operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ComplianceError {
    /// Errors while turning raw SBOM content into a document
    #[error("Failed to parse SBOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while rendering a compliance report
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// Reading an SBOM file failed
    #[error("IO error: {0}")]
    Io(String),

    /// Static criterion table or input validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Unknown SBOM format - expected CycloneDX or SPDX markers")]
    UnknownFormat,

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid XML structure: {0}")]
    InvalidXml(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("No metadata for criterion {0} in the active standard")]
    MissingCriterion(String),

    #[error("Formatting failed: {0}")]
    FormatError(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-compliance operations
pub type Result<T> = std::result::Result<T, ComplianceError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ComplianceError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ============================================================================
// Conversions from module error types
// ============================================================================

impl From<ParseError> for ComplianceError {
    fn from(err: ParseError) -> Self {
        let kind = match err {
            ParseError::IoError(msg) => return Self::Io(msg),
            ParseError::JsonError(msg) => ParseErrorKind::InvalidJson(msg),
            ParseError::XmlError(msg) => ParseErrorKind::InvalidXml(msg),
            ParseError::YamlError(msg) => ParseErrorKind::InvalidYaml(msg),
            ParseError::UnknownFormat(_) => ParseErrorKind::UnknownFormat,
            ParseError::MissingField(field) => ParseErrorKind::MissingField {
                field,
                context: "document".to_string(),
            },
        };
        Self::parse(String::new(), kind)
    }
}

impl From<ReportError> for ComplianceError {
    fn from(err: ReportError) -> Self {
        let kind = match err {
            ReportError::SerializationError(msg) => ReportErrorKind::JsonSerializationError(msg),
            ReportError::MissingCriterion(key) => ReportErrorKind::MissingCriterion(key),
            ReportError::FormatError(e) => ReportErrorKind::FormatError(e.to_string()),
        };
        Self::report(String::new(), kind)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost-first, so a failure deep in a
/// parser reads like `loading fixtures: parsing sbom.json: <cause>`.
///
/// # Example
///
/// ```ignore
/// use sbom_compliance::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<ParsedDocument> {
///     let content = std::fs::read_to_string(path).context("reading SBOM file")?;
///     parse_document_str(&content)
///         .with_context(|| format!("parsing SBOM from {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ComplianceError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: ComplianceError, new_ctx: &str) -> ComplianceError {
    match err {
        ComplianceError::Parse {
            context: existing,
            source,
        } => ComplianceError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ComplianceError::Report {
            context: existing,
            source,
        } => ComplianceError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ComplianceError::Io(msg) => ComplianceError::Io(chain_context(new_ctx, &msg)),
        ComplianceError::Validation(msg) => {
            ComplianceError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
///
/// Returns "`new`: `existing`", or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ComplianceError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| ComplianceError::Validation(f().into()))
    }
}

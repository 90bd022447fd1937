//! **Checklist compliance scoring for Software Bills of Materials (SBOMs).**
//!
//! `sbom-compliance` answers one question: does this SBOM satisfy a
//! compliance standard, and exactly where does it fall short? The built-in
//! standard is the NTIA "minimum elements" checklist.
//!
//! Scoring works on a format-independent view of the document, so
//! **CycloneDX** (JSON, XML) and **SPDX** (JSON, YAML, tag-value) are
//! scored by the same checks.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Document`] and [`Component`] traits, plus the
//!   SPDX and CycloneDX document types that implement them.
//! - **[`parsers`]**: format detection and parsing into a `Box<dyn Document>`.
//! - **[`compliance`]**: the criterion table ([`Standard`]), the check
//!   functions, the [`RecordStore`] and [`Score`] aggregation.
//! - **[`reports`]**: JSON, detailed-table and one-line renderers.
//! - **[`pipeline`]** / **[`cli`]**: plumbing for the command-line tool.
//! - **[`config`]**: YAML configuration with discovery and validation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use sbom_compliance::{parse_sbom, ComplianceEngine, Score};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let document = parse_sbom(Path::new("path/to/your/sbom.json"))?;
//!
//!     let engine = ComplianceEngine::ntia()?;
//!     let store = engine.evaluate(document.as_ref());
//!     let score = Score::for_document(&store, engine.standard());
//!
//!     println!(
//!         "NTIA score {:.1} (required {:.1}, optional {:.1})",
//!         score.total, score.required, score.optional
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Rendering a report
//!
//! ```no_run
//! use std::path::Path;
//! use sbom_compliance::reports::{create_reporter, ReportContext, ReportFormat};
//! use sbom_compliance::{parse_sbom, ComplianceEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let document = parse_sbom(Path::new("sbom.spdx"))?;
//!     let engine = ComplianceEngine::ntia()?;
//!     let store = engine.evaluate(document.as_ref());
//!
//!     let ctx = ReportContext::new(engine.standard(), &store, "sbom.spdx");
//!     print!("{}", create_reporter(ReportFormat::Detailed).generate(&ctx)?);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Scores are means over record counts
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    // self is kept for API consistency across parser impls
    clippy::unused_self
)]

pub mod cli;
pub mod compliance;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use compliance::{
    ComplianceEngine, Criterion, CriterionMeta, Record, RecordStore, Score, Standard, Summary,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{ComplianceError, ErrorContext, OptionContext, Result};
pub use model::{Component, Document, ExternalReference, Identity};
pub use parsers::{parse_sbom, parse_sbom_str, SbomParser};
pub use reports::{ReportFormat, ReportGenerator};

//! Report generation for compliance results.
//!
//! Reporters are read-only consumers of a [`RecordStore`] and its
//! [`Standard`]; they never change scores.
//!
//! - JSON: structured data for programmatic integration
//! - Detailed: one table row per element, for terminals
//! - Basic: a single score line, for scripts and CI logs

mod basic;
mod detailed;
mod json;
mod types;

pub use basic::BasicReporter;
pub use detailed::DetailedReporter;
pub use json::JsonReporter;
pub use types::{
    build_sections, report_element_id, sort_sections, ReportFormat, Section, REPORT_DOC_ELEMENT_ID,
};

use crate::compliance::{RecordStore, Standard};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("No metadata for criterion {0}")]
    MissingCriterion(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Everything a reporter may read.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub standard: &'a Standard,
    pub store: &'a RecordStore,
    /// Name of the scored file as shown to the user
    pub file_name: &'a str,
}

impl<'a> ReportContext<'a> {
    pub const fn new(standard: &'a Standard, store: &'a RecordStore, file_name: &'a str) -> Self {
        Self {
            standard,
            store,
            file_name,
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a report for one scored document
    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        ctx: &ReportContext<'_>,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(ctx)?;
        writer
            .write_all(report.as_bytes())
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Apply ANSI color formatting if colored output is enabled.
pub(crate) fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Color for a score on the 0-10 scale.
pub(crate) fn score_color(score: f64) -> &'static str {
    if score >= 10.0 {
        "green"
    } else if score > 0.0 {
        "yellow"
    } else {
        "red"
    }
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true, true)
}

/// Create a report generator with color and JSON layout control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
    pretty: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Json => Box::new(JsonReporter::new().pretty(pretty)),
        ReportFormat::Detailed => {
            if use_color {
                Box::new(DetailedReporter::new())
            } else {
                Box::new(DetailedReporter::new().no_color())
            }
        }
        ReportFormat::Basic => {
            if use_color {
                Box::new(BasicReporter::new())
            } else {
                Box::new(BasicReporter::new().no_color())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{Criterion, Record};

    #[test]
    fn test_factory_formats() {
        for format in [ReportFormat::Json, ReportFormat::Detailed, ReportFormat::Basic] {
            assert_eq!(create_reporter(format).format(), format);
        }
    }

    #[test]
    fn test_write_report() {
        let store: RecordStore = [Record::for_document(Criterion::SbomCreator, 10.0, "syft")]
            .into_iter()
            .collect();
        let ctx = ReportContext::new(Standard::ntia(), &store, "a.json");
        let mut out = Vec::new();
        create_reporter_with_options(ReportFormat::Basic, false, true)
            .write_report(&ctx, &mut out)
            .unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("NTIA Report"));
    }

    #[test]
    fn test_ansi_color() {
        assert_eq!(ansi_color("x", "red", false), "x");
        assert_eq!(ansi_color("x", "red", true), "\x1b[31mx\x1b[0m");
        assert_eq!(score_color(10.0), "green");
        assert_eq!(score_color(0.0), "red");
    }
}

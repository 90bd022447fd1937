//! JSON report generator.

use super::types::build_sections;
use super::{ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::compliance::Summary;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Version of the report layout below.
pub const ENGINE_VERSION: &str = "1";

/// JSON report generator
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, ReportError> {
        let sections = build_sections(ctx)?
            .into_iter()
            .map(|s| JsonSection {
                section_title: s.title,
                section_id: s.section_id,
                section_data_field: s.data_field,
                required: s.required,
                element_id: s.entity_id,
                element_result: s.result,
                score: s.score,
            })
            .collect();

        let report = JsonReport {
            report_name: ctx.standard.report_name(),
            subtitle: ctx.standard.subtitle(),
            revision: "",
            run: RunInfo {
                id: Uuid::new_v4().to_string(),
                generated_at: Utc::now().to_rfc3339(),
                file_name: ctx.file_name,
                engine_version: ENGINE_VERSION,
            },
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                vendor: env!("CARGO_PKG_AUTHORS"),
            },
            summary: Summary::for_document(ctx.store, ctx.standard),
            sections,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        rendered.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    report_name: &'a str,
    subtitle: &'a str,
    revision: &'a str,
    run: RunInfo<'a>,
    tool: ToolInfo,
    summary: Summary,
    sections: Vec<JsonSection<'a>>,
}

#[derive(Serialize)]
struct RunInfo<'a> {
    id: String,
    generated_at: String,
    file_name: &'a str,
    engine_version: &'static str,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
    vendor: &'static str,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    section_title: &'a str,
    section_id: &'a str,
    section_data_field: &'a str,
    required: bool,
    element_id: &'a str,
    element_result: &'a str,
    score: f64,
}

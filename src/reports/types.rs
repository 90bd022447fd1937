//! Report type definitions.

use super::{ReportContext, ReportError};
use crate::compliance::{compare_section_ids, Criterion, DOC_ENTITY_ID};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Structured JSON output
    Json,
    /// Per-element table
    Detailed,
    /// One-line score summary
    #[default]
    Basic,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Detailed => write!(f, "detailed"),
            Self::Basic => write!(f, "basic"),
        }
    }
}

/// Element id every report uses for the document entity.
pub const REPORT_DOC_ELEMENT_ID: &str = "sbom";

/// Map a store entity id to the element id shown in reports.
#[must_use]
pub fn report_element_id(entity_id: &str) -> &str {
    if entity_id == DOC_ENTITY_ID {
        REPORT_DOC_ELEMENT_ID
    } else {
        entity_id
    }
}

/// One record joined with its criterion metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub criterion: Criterion,
    pub title: &'a str,
    pub section_id: &'a str,
    pub data_field: &'a str,
    pub required: bool,
    pub entity_id: &'a str,
    pub result: &'a str,
    pub score: f64,
}

/// Join every record with its metadata, in store order.
///
/// The document entity is renamed to [`REPORT_DOC_ELEMENT_ID`] here so
/// every renderer shows and sorts it the same way.
///
/// A record whose criterion has no metadata is an error rather than a
/// blank row.
pub fn build_sections<'a>(ctx: &ReportContext<'a>) -> Result<Vec<Section<'a>>, ReportError> {
    ctx.store
        .iter()
        .map(|record| {
            let meta = ctx.standard.meta(record.criterion()).ok_or_else(|| {
                ReportError::MissingCriterion(format!(
                    "{} (key {})",
                    record.criterion(),
                    record.criterion().key()
                ))
            })?;
            Ok(Section {
                criterion: record.criterion(),
                title: &meta.title,
                section_id: &meta.section_id,
                data_field: &meta.data_field,
                required: meta.required,
                entity_id: report_element_id(record.entity_id()),
                result: record.result(),
                score: record.score(),
            })
        })
        .collect()
}

/// Sort by entity id, then numerically by section id.
pub fn sort_sections(sections: &mut [Section<'_>]) {
    sections.sort_by(|a, b| {
        a.entity_id
            .cmp(b.entity_id)
            .then_with(|| compare_section_ids(a.section_id, b.section_id))
    });
}

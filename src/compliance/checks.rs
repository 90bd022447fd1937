//! NTIA minimum-element checks.
//!
//! Each function inspects one criterion and returns a [`Record`]. Checks do
//! not depend on each other and can run in any order. Missing data yields a
//! zero (or partial) score, never an error.

use super::criteria::Criterion;
use super::record::{Record, MAX_SCORE};
use super::resolve::ResolutionContext;
use crate::model::{Component, Document};
use chrono::DateTime;

/// Dialects that count as machine readable.
const SUPPORTED_SPECS: &[&str] = &["spdx", "cyclonedx"];

/// Serializations that count as machine readable.
const SUPPORTED_FORMATS: &[&str] = &["json", "xml", "yaml", "rdf", "tag-value"];

/// Reference kinds accepted as unique identifiers.
pub const RECOGNIZED_ID_KINDS: &[&str] = &["purl", "cpe"];

/// Result text for components without dependencies.
pub const NO_RELATIONSHIPS: &str = "no-relationships";

fn binary(present: bool) -> f64 {
    if present {
        MAX_SCORE
    } else {
        0.0
    }
}

/// SBOM is in a machine-readable dialect and serialization.
pub fn sbom_machine_format(document: &dyn Document) -> Record {
    let spec = document.spec_type().trim().to_ascii_lowercase();
    let format = document.format().trim().to_ascii_lowercase();

    let supported =
        SUPPORTED_SPECS.contains(&spec.as_str()) && SUPPORTED_FORMATS.contains(&format.as_str());

    Record::for_document(
        Criterion::SbomMachineFormat,
        binary(supported),
        format!("{spec}, {format}"),
    )
}

/// First creator with something to display.
pub fn sbom_creator(document: &dyn Document) -> Record {
    let creator = document
        .creators()
        .iter()
        .map(|c| c.display_value())
        .find(|v| !v.is_empty())
        .unwrap_or_default();

    Record::for_document(Criterion::SbomCreator, binary(!creator.is_empty()), creator)
}

/// Creation time is present and RFC 3339. The raw value is reported either way.
pub fn sbom_timestamp(document: &dyn Document) -> Record {
    let raw = document.creation_timestamp().trim();
    let valid = !raw.is_empty() && DateTime::parse_from_rfc3339(raw).is_ok();

    Record::for_document(Criterion::SbomTimestamp, binary(valid), raw)
}

/// The primary component declares dependencies.
pub fn sbom_dependencies(document: &dyn Document) -> Record {
    let count = document.primary_component_dependency_count();
    Record::for_document(
        Criterion::SbomDependency,
        binary(count > 0),
        format!("doc has {count} dependencies"),
    )
}

/// The document lists components.
pub fn sbom_components(document: &dyn Document) -> Record {
    let count = document.components().len();
    Record::for_document(
        Criterion::SbomComponents,
        binary(count > 0),
        format!("doc has {count} components"),
    )
}

pub fn comp_name(component: &dyn Component) -> Record {
    let name = component.name().trim();
    Record::new(Criterion::CompName, component.id(), binary(!name.is_empty()), name)
}

pub fn comp_version(component: &dyn Component) -> Record {
    let version = component.version().trim();
    Record::new(
        Criterion::CompVersion,
        component.id(),
        binary(!version.is_empty()),
        version,
    )
}

pub fn comp_supplier(component: &dyn Component) -> Record {
    let supplier = component
        .supplier()
        .map(|s| s.display_value())
        .unwrap_or_default();
    Record::new(
        Criterion::CompSupplier,
        component.id(),
        binary(!supplier.is_empty()),
        supplier,
    )
}

/// Share of external references that are recognized unique identifiers.
///
/// Result is `<kinds>:(found/total)`, kinds in first-seen order.
pub fn comp_other_uniq_ids(component: &dyn Component) -> Record {
    let references = component.external_references();
    let total = references.len();

    let mut kinds: Vec<&str> = Vec::new();
    let mut found = 0usize;
    for reference in references {
        if let Some(kind) = RECOGNIZED_ID_KINDS
            .iter()
            .copied()
            .find(|k| reference.kind.eq_ignore_ascii_case(k))
        {
            found += 1;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }

    if found == 0 {
        return Record::new(Criterion::CompOtherUniqIds, component.id(), 0.0, "");
    }

    #[allow(clippy::cast_precision_loss)]
    let score = MAX_SCORE * found as f64 / total as f64;
    Record::new(
        Criterion::CompOtherUniqIds,
        component.id(),
        score,
        format!("{}:({found}/{total})", kinds.join(",")),
    )
}

/// Direct dependencies of the component, by name where known.
pub fn comp_dependencies(
    document: &dyn Document,
    component: &dyn Component,
    ctx: &ResolutionContext,
) -> Record {
    let dependencies = document.dependencies_of(component.id());
    if dependencies.is_empty() {
        return Record::new(
            Criterion::CompDependencies,
            component.id(),
            0.0,
            NO_RELATIONSHIPS,
        );
    }

    let names: Vec<&str> = dependencies.iter().map(|id| ctx.resolve(id)).collect();
    Record::new(
        Criterion::CompDependencies,
        component.id(),
        MAX_SCORE,
        names.join(", "),
    )
}

/// Run every document-level check.
pub fn document_checks(document: &dyn Document) -> Vec<Record> {
    vec![
        sbom_machine_format(document),
        sbom_creator(document),
        sbom_timestamp(document),
        sbom_dependencies(document),
        sbom_components(document),
    ]
}

/// Run every component-level check for one component.
pub fn component_checks(
    document: &dyn Document,
    component: &dyn Component,
    ctx: &ResolutionContext,
) -> Vec<Record> {
    vec![
        comp_name(component),
        comp_dependencies(document, component, ctx),
        comp_supplier(component),
        comp_version(component),
        comp_other_uniq_ids(component),
    ]
}

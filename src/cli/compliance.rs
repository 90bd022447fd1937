//! Compliance command handler.
//!
//! Implements the `compliance` subcommand: parse, score, report.

use crate::compliance::{ComplianceEngine, RecordStore, Score, Standard};
use crate::config::{AppConfig, Validatable};
use crate::model::Document;
use crate::pipeline::{
    exit_codes, parse_sbom_with_context, should_use_color, write_output, OutputTarget,
    ParsedDocument,
};
use crate::reports::create_reporter_with_options;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Run the compliance command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_compliance(paths: &[PathBuf], config: &AppConfig) -> Result<i32> {
    if paths.is_empty() {
        bail!("No SBOM files given");
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration: {}", messages.join("; "));
    }

    let engine = ComplianceEngine::for_standard(&config.compliance.standard)?;
    let standard = engine.standard();
    let quiet = config.behavior.quiet;

    let parsed = paths
        .iter()
        .map(|path| parse_sbom_with_context(path, quiet))
        .collect::<Result<Vec<ParsedDocument>>>()?;
    let documents: Vec<&dyn Document> = parsed.iter().map(ParsedDocument::document).collect();
    let stores = engine.evaluate_all(&documents);

    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color) && target.is_terminal();
    let reporter =
        create_reporter_with_options(config.output.format, use_color, config.output.pretty);

    let reports = parsed
        .iter()
        .zip(&stores)
        .map(|(doc, store)| engine.render(reporter.as_ref(), store, &doc.file_name))
        .collect::<crate::Result<Vec<String>>>()?;
    write_output(&join_reports(&reports), &target, quiet)?;

    Ok(threshold_exit_code(
        &parsed,
        &stores,
        standard,
        config.compliance.min_score,
    ))
}

/// Reports in input order, separated by a single newline.
fn join_reports(reports: &[String]) -> String {
    let mut out = String::new();
    for report in reports {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(report);
    }
    out
}

/// Compare the lowest total against `min_score`.
fn threshold_exit_code(
    parsed: &[ParsedDocument],
    stores: &[RecordStore],
    standard: &Standard,
    min_score: Option<f64>,
) -> i32 {
    let Some(threshold) = min_score else {
        return exit_codes::SUCCESS;
    };

    let lowest = parsed
        .iter()
        .zip(stores)
        .map(|(doc, store)| (doc, Score::for_document(store, standard).total))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match lowest {
        Some((doc, total)) if total < threshold => {
            tracing::error!(
                "Compliance score {:.1} for {} is below minimum threshold {:.1}",
                total,
                doc.file_name,
                threshold
            );
            exit_codes::BELOW_THRESHOLD
        }
        _ => exit_codes::SUCCESS,
    }
}

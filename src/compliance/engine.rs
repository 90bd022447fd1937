//! Runs every check of a standard against a document.

use super::checks;
use super::criteria::Standard;
use super::resolve::ResolutionContext;
use super::store::RecordStore;
use crate::error::{ErrorContext, OptionContext, Result};
use crate::model::Document;
use crate::parsers::parse_sbom;
use crate::reports::{ReportContext, ReportGenerator};
use rayon::prelude::*;
use std::path::Path;

/// Evaluates documents against one validated [`Standard`].
#[derive(Debug, Clone, Copy)]
pub struct ComplianceEngine<'s> {
    standard: &'s Standard,
}

impl<'s> ComplianceEngine<'s> {
    /// Create an engine. Fails if the standard lacks metadata for any criterion.
    pub fn new(standard: &'s Standard) -> Result<Self> {
        standard.validate()?;
        Ok(Self { standard })
    }

    /// Engine for the built-in NTIA table.
    pub fn ntia() -> Result<ComplianceEngine<'static>> {
        ComplianceEngine::new(Standard::ntia())
    }

    /// Engine for a built-in standard looked up by name (`ntia`).
    pub fn for_standard(name: &str) -> Result<ComplianceEngine<'static>> {
        let standard =
            Standard::by_name(name).with_context_none(|| format!("unknown standard: {name}"))?;
        ComplianceEngine::new(standard)
    }

    #[must_use]
    pub const fn standard(&self) -> &'s Standard {
        self.standard
    }

    /// Evaluate a document with names resolved from its own components.
    #[must_use]
    pub fn evaluate(&self, document: &dyn Document) -> RecordStore {
        let ctx = ResolutionContext::from_document(document);
        self.evaluate_with(document, &ctx)
    }

    /// Evaluate a document with a caller-supplied resolution context.
    #[must_use]
    pub fn evaluate_with(&self, document: &dyn Document, ctx: &ResolutionContext) -> RecordStore {
        let components = document.components();
        tracing::debug!(
            "Evaluating {} document ({} components) against {}",
            document.spec_type(),
            components.len(),
            self.standard.name()
        );

        let mut store = RecordStore::new();
        store.extend(checks::document_checks(document));
        for component in components {
            store.extend(checks::component_checks(document, component, ctx));
        }
        store
    }

    /// Parse and evaluate one SBOM file.
    pub fn evaluate_file(&self, path: &Path) -> Result<RecordStore> {
        let document =
            parse_sbom(path).with_context(|| format!("scoring {}", path.display()))?;
        Ok(self.evaluate(document.as_ref()))
    }

    /// Render an evaluated store with `reporter`.
    pub fn render(
        &self,
        reporter: &dyn ReportGenerator,
        store: &RecordStore,
        file_name: &str,
    ) -> Result<String> {
        let ctx = ReportContext::new(self.standard, store, file_name);
        reporter
            .generate(&ctx)
            .with_context(|| format!("rendering report for {file_name}"))
    }

    /// Evaluate several documents in parallel. Output order matches input order.
    #[must_use]
    pub fn evaluate_all(&self, documents: &[&dyn Document]) -> Vec<RecordStore> {
        tracing::info!("Scoring {} documents", documents.len());
        documents
            .par_iter()
            .map(|document| self.evaluate(*document))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::criteria::{Criterion, CriterionMeta};
    use crate::compliance::fixtures::{failing_document, passing_document, FakeComponent};
    use crate::compliance::record::DOC_ENTITY_ID;
    use crate::compliance::record::Record;
    use crate::compliance::score::Score;
    use crate::error::{ComplianceError, ReportErrorKind};
    use crate::reports::{BasicReporter, JsonReporter};

    #[test]
    fn test_passing_document_scores_ten() {
        let engine = ComplianceEngine::ntia().unwrap();
        let doc = passing_document("spdx", "json");

        let mut ctx = ResolutionContext::from_document(&doc);
        ctx.insert(
            "github/spdx/gordf@b735bd5aac89fe25cad4ef488a95bc00ea549edd",
            "gordf",
        );
        let store = engine.evaluate_with(&doc, &ctx);

        assert_eq!(store.len(), 10);
        assert!(store.iter().all(|r| r.score() == 10.0));
        let score = Score::for_document(&store, engine.standard());
        assert_eq!(score.total, 10.0);
        assert_eq!(score.required, 10.0);
    }

    #[test]
    fn test_one_record_per_criterion_and_entity() {
        let engine = ComplianceEngine::ntia().unwrap();
        let mut doc = passing_document("spdx", "json");
        doc.components.push(FakeComponent::named("second"));

        let store = engine.evaluate(&doc);
        assert_eq!(store.len(), 5 + 2 * 5);
        assert_eq!(store.records_for_entity(DOC_ENTITY_ID).len(), 5);
        assert_eq!(store.records_for_criterion(Criterion::CompName).len(), 2);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let engine = ComplianceEngine::ntia().unwrap();
        let doc = failing_document();
        let first: Vec<_> = engine.evaluate(&doc).iter().cloned().collect();
        let second: Vec<_> = engine.evaluate(&doc).iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_batch_preserves_order() {
        let engine = ComplianceEngine::ntia().unwrap();
        let passing = passing_document("cyclonedx", "xml");
        let failing = failing_document();
        let documents: Vec<&dyn Document> = vec![&failing, &passing, &failing];

        let stores = engine.evaluate_all(&documents);
        assert_eq!(stores.len(), 3);
        let totals: Vec<f64> = stores
            .iter()
            .map(|s| Score::for_document(s, engine.standard()).total)
            .collect();
        assert!(totals[0] < totals[1]);
        assert_eq!(totals[0], totals[2]);
    }

    #[test]
    fn test_for_standard() {
        let engine = ComplianceEngine::for_standard("NTIA").unwrap();
        assert_eq!(engine.standard().name(), "NTIA");

        let err = ComplianceEngine::for_standard("fsct").unwrap_err();
        assert!(err.to_string().contains("unknown standard: fsct"));
    }

    #[test]
    fn test_evaluate_file_errors_carry_the_path() {
        let engine = ComplianceEngine::ntia().unwrap();
        let err = engine
            .evaluate_file(Path::new("/nonexistent/sbom.json"))
            .unwrap_err();
        assert!(err.to_string().contains("scoring /nonexistent/sbom.json"));
    }

    #[test]
    fn test_render() {
        let engine = ComplianceEngine::ntia().unwrap();
        let store = engine.evaluate(&failing_document());
        let line = engine
            .render(&BasicReporter::new().no_color(), &store, "bad.json")
            .unwrap();
        assert!(line.starts_with("NTIA Report Score:"));
        assert!(line.trim_end().ends_with("for bad.json"));
    }

    #[test]
    fn test_render_errors_name_the_file() {
        let store: RecordStore = [Record::new(Criterion::CompName, "a", 10.0, "a")]
            .into_iter()
            .collect();
        let standard = Standard::new(
            "Partial",
            "Partial",
            "",
            [(Criterion::SbomCreator, CriterionMeta::new("Author", "2.1", "Author", true))],
        );
        // bypasses `new`, which would reject the table up front
        let err = ComplianceEngine { standard: &standard }
            .render(&JsonReporter::new(), &store, "x.json")
            .unwrap_err();
        assert!(matches!(
            err,
            ComplianceError::Report {
                source: ReportErrorKind::MissingCriterion(_),
                ..
            }
        ));
        assert!(err.to_string().contains("rendering report for x.json"));
    }

    #[test]
    fn test_incomplete_standard_is_rejected() {
        let standard = Standard::new(
            "partial",
            "Partial",
            "",
            [(
                Criterion::CompName,
                CriterionMeta::new("Name", "1", "Name", true),
            )],
        );
        assert!(ComplianceEngine::new(&standard).is_err());
    }
}

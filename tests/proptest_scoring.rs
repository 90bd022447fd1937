//! Property-based tests for record scoring and aggregation.

use proptest::prelude::*;
use sbom_compliance::compliance::{
    checks, ComplianceEngine, Criterion, Record, RecordStore, Score, Standard, MAX_SCORE,
};
use sbom_compliance::model::{ExternalReference, Identity, SpdxComponent, SpdxSbom};
use std::collections::HashSet;

fn criterion() -> impl Strategy<Value = Criterion> {
    prop::sample::select(Criterion::ALL.to_vec())
}

fn reference() -> impl Strategy<Value = ExternalReference> {
    (
        prop::sample::select(vec!["purl", "PURL", "cpe", "cpe23Type", "website", "swh", "vcs"]),
        "[a-z:/@.0-9]{1,20}",
    )
        .prop_map(|(kind, locator)| ExternalReference::new(kind, locator))
}

fn component() -> impl Strategy<Value = SpdxComponent> {
    (
        "SPDXRef-[a-e]",
        "[a-z]{0,6}",
        "([0-9]\\.[0-9])?",
        prop::option::of("[A-Za-z ]{0,10}"),
        prop::collection::vec(reference(), 0..5),
    )
        .prop_map(|(spdx_id, name, version, supplier, external_refs)| SpdxComponent {
            spdx_id,
            name,
            version,
            supplier: supplier.and_then(|s| Identity::from_spdx_actor(&s)),
            external_refs,
        })
}

fn document() -> impl Strategy<Value = SpdxSbom> {
    (
        prop::sample::select(vec!["json", "yaml", "tag-value", "csv"]),
        prop::collection::vec(component(), 0..12),
    )
        .prop_map(|(format, packages)| SpdxSbom {
            format: format.to_string(),
            spec_version: "SPDX-2.3".to_string(),
            created: "2024-01-01T00:00:00Z".to_string(),
            packages,
            ..SpdxSbom::default()
        })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

proptest! {
    #[test]
    fn record_scores_stay_in_range(
        c in criterion(),
        score in prop::num::f64::ANY,
    ) {
        let record = Record::new(c, "x", score, "");
        prop_assert!((0.0..=MAX_SCORE).contains(&record.score()));
    }

    #[test]
    fn evaluated_scores_stay_in_range(doc in document()) {
        let engine = ComplianceEngine::ntia().unwrap();
        let store = engine.evaluate(&doc);
        for record in store.iter() {
            prop_assert!((0.0..=MAX_SCORE).contains(&record.score()));
        }
        let score = Score::for_document(&store, engine.standard());
        prop_assert!((0.0..=MAX_SCORE).contains(&score.total));
        prop_assert!((0.0..=MAX_SCORE).contains(&score.required));
    }

    #[test]
    fn store_has_one_record_per_criterion_and_entity(doc in document()) {
        let engine = ComplianceEngine::ntia().unwrap();
        let store = engine.evaluate(&doc);

        let distinct_ids: HashSet<&str> =
            doc.packages.iter().map(|p| p.spdx_id.as_str()).collect();
        prop_assert_eq!(store.len(), 5 + 5 * distinct_ids.len());

        let keys: HashSet<(Criterion, &str)> =
            store.iter().map(|r| (r.criterion(), r.entity_id())).collect();
        prop_assert_eq!(keys.len(), store.len());
    }

    #[test]
    fn aggregates_are_means(
        records in prop::collection::vec(
            (criterion(), "[a-c]", 0.0f64..=10.0),
            0..40,
        ),
        optional in prop::collection::hash_set(criterion(), 0..5),
    ) {
        let standard = Standard::new(
            "test",
            "test",
            "",
            Criterion::ALL.iter().map(|c| {
                (*c, sbom_compliance::CriterionMeta::new(c.name(), "1", c.name(), !optional.contains(c)))
            }),
        );
        let store: RecordStore = records
            .iter()
            .map(|(c, entity, score)| Record::new(*c, entity.as_str(), *score, ""))
            .collect();

        let all: Vec<f64> = store.iter().map(Record::score).collect();
        let required: Vec<f64> = store
            .iter()
            .filter(|r| standard.is_required(r.criterion()))
            .map(Record::score)
            .collect();
        let optional_scores: Vec<f64> = store
            .iter()
            .filter(|r| !standard.is_required(r.criterion()))
            .map(Record::score)
            .collect();

        let score = Score::for_document(&store, &standard);
        prop_assert!((score.total - mean(&all)).abs() < 1e-9);
        prop_assert!((score.required - mean(&required)).abs() < 1e-9);
        prop_assert!((score.optional - mean(&optional_scores)).abs() < 1e-9);
    }

    #[test]
    fn uniq_id_score_is_recognized_share(refs in prop::collection::vec(reference(), 0..8)) {
        let component = SpdxComponent {
            spdx_id: "SPDXRef-x".to_string(),
            external_refs: refs.clone(),
            ..SpdxComponent::default()
        };
        let record = checks::comp_other_uniq_ids(&component);

        let found = refs
            .iter()
            .filter(|r| checks::RECOGNIZED_ID_KINDS.contains(&r.kind.to_ascii_lowercase().as_str()))
            .count();
        let expected = if found == 0 {
            0.0
        } else {
            MAX_SCORE * found as f64 / refs.len() as f64
        };
        prop_assert!((record.score() - expected).abs() < 1e-9);
    }
}

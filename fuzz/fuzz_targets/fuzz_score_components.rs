#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_compliance::{ComplianceEngine, Score};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Score arbitrary CycloneDX component arrays.
///
/// The envelope always parses when the fragment is valid JSON, so the
/// checks see odd references, ids and dependency edges.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if s.len() >= MAX_WRAPPED_INPUT_LEN {
        return;
    }
    let wrapped = format!(
        r#"{{"bomFormat":"CycloneDX","specVersion":"1.5","components":[{s}]}}"#,
    );
    let Ok(document) = sbom_compliance::parse_sbom_str(&wrapped) else {
        return;
    };
    let Ok(engine) = ComplianceEngine::ntia() else {
        return;
    };
    let store = engine.evaluate(document.as_ref());
    for record in store.iter() {
        assert!((0.0..=10.0).contains(&record.score()));
    }
    let score = Score::for_document(&store, engine.standard());
    assert!(score.required >= 0.0 && score.optional >= 0.0);
});

#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_compliance::{ComplianceEngine, Score};

/// Fuzz the main entry point: detect, parse, then score.
///
/// Anything that parses must score inside 0-10.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(document) = sbom_compliance::parsers::parse_sbom_str(s) {
            let Ok(engine) = ComplianceEngine::ntia() else {
                return;
            };
            let store = engine.evaluate(document.as_ref());
            let score = Score::for_document(&store, engine.standard());
            assert!((0.0..=10.0).contains(&score.total));
        }
    }
});

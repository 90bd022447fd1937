#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the format detection logic.
///
/// Exercises the confidence heuristics without parsing.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(detected) = sbom_compliance::parsers::detect_format(s) {
            assert!(detected.confidence >= sbom_compliance::parsers::MIN_CONFIDENCE_THRESHOLD);
        }
    }
});

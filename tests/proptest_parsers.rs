//! Property-based tests for SBOM parsers.
//!
//! Ensures parsers don't panic on arbitrary input, and that anything
//! they do accept can be scored.

use proptest::prelude::*;
use sbom_compliance::parsers::{detect_format, parse_sbom_str};
use sbom_compliance::{ComplianceEngine, Score};

fn score_if_parsed(input: &str) {
    if let Ok(document) = parse_sbom_str(input) {
        let engine = ComplianceEngine::ntia().unwrap();
        let store = engine.evaluate(document.as_ref());
        let score = Score::for_document(&store, engine.standard());
        assert!((0.0..=10.0).contains(&score.total));
    }
}

proptest! {
    // Parser tests only assert no-panic: random input is expected to
    // produce Err in almost all cases.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_sbom_str_doesnt_panic(s in "\\PC{0,2000}") {
        let result = parse_sbom_str(&s);
        prop_assert!(result.is_err(), "Random input should not parse successfully: {:?}", s);
    }

    #[test]
    fn detect_format_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = detect_format(&s);
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        score_if_parsed(&s);
    }

    #[test]
    fn xml_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"<[a-z]{1,20}>[^<]{0,200}</[a-z]{1,20}>"#).unwrap()
    ) {
        score_if_parsed(&s);
    }

    #[test]
    fn spdx_tag_value_lines_dont_panic(
        lines in prop::collection::vec(
            ("(PackageName|SPDXID|PackageVersion|PackageSupplier|ExternalRef|Relationship|Creator|Created)", "\\PC{0,60}"),
            0..20,
        ),
    ) {
        let mut input = String::from("SPDXVersion: SPDX-2.3\nDataLicense: CC0-1.0\n");
        for (tag, value) in &lines {
            input.push_str(&format!("{tag}: {value}\n"));
        }
        score_if_parsed(&input);
    }

    #[test]
    fn empty_and_whitespace_doesnt_panic(s in "\\s{0,100}") {
        prop_assert!(parse_sbom_str(&s).is_err());
        prop_assert!(detect_format(&s).is_none());
    }

    #[test]
    fn cyclonedx_partial_json_doesnt_panic(
        version in "1\\.[0-9]",
        extra in "\\PC{0,200}",
    ) {
        let input = format!(r#"{{"bomFormat": "CycloneDX", "specVersion": "{version}", {extra}}}"#);
        score_if_parsed(&input);
    }

    #[test]
    fn spdx_partial_json_doesnt_panic(
        version in "SPDX-[0-9]\\.[0-9]",
        extra in "\\PC{0,200}",
    ) {
        let input = format!(r#"{{"spdxVersion": "{version}", "SPDXID": "SPDXRef-DOCUMENT", {extra}}}"#);
        score_if_parsed(&input);
    }
}

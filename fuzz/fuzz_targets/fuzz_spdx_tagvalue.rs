#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_compliance::parsers::SpdxParser;

/// Fuzz the SPDX tag-value parser behind a valid document header.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = SpdxParser::new();
        let _ = parser.parse_spdx(s);

        if s.len() < 10_000 {
            let wrapped = format!(
                "SPDXVersion: SPDX-2.3\nDataLicense: CC0-1.0\nSPDXID: SPDXRef-DOCUMENT\nDocumentName: fuzz\n{s}",
            );
            let _ = parser.parse_spdx(&wrapped);
        }
    }
});

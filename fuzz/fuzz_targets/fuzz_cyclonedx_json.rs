#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_tree_diff::parsers::{CycloneDxParser, SbomParser};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the CycloneDX JSON parser and graph builder.
///
/// Wraps input as the `dependencies` array of a document with a valid root so
/// that edge resolution and hull computation are reached.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = CycloneDxParser::default();

        let _ = parser.parse_str(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"{{"metadata":{{"component":{{"group":"g","name":"root","version":"1.0.0","purl":"pkg:maven/g/root@1.0.0","bom-ref":"root"}}}},"components":[{{"group":"g","name":"a","version":"1.0.0","purl":"pkg:maven/g/a@1.0.0","bom-ref":"a"}}],"dependencies":[{s}]}}"#,
            );
            let _ = parser.parse_str(&wrapped);
        }
    }
});

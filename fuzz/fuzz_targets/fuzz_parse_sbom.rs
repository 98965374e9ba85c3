#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_tree_diff::config::CompiledConfig;

/// Fuzz the string parsing entry point.
///
/// Feeds arbitrary UTF-8 strings to `parse_sbom_str`, which deserializes the
/// document and links its dependency graph.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = sbom_tree_diff::parsers::parse_sbom_str(s, &CompiledConfig::default());
    }
});

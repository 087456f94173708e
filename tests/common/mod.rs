//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use scriptbuilder_rs::{BuildOptions, Pipeline, ScriptBuilder};
use scriptbuilder_rs::pipeline::ScriptStyle;

/// Builder that emits fragments only, with no preamble
pub fn bare_builder() -> ScriptBuilder {
    ScriptBuilder::new(
        ScriptStyle::default(),
        BuildOptions {
            preamble: false,
            best_effort: false,
        },
    )
}

/// Render each node on its own, in pipeline order
pub fn fragments(pipeline: &Pipeline) -> Vec<String> {
    let style = ScriptStyle::default();
    pipeline
        .list_nodes()
        .iter()
        .map(|node| node.render(&style).expect("node should render").into_string())
        .collect()
}

/// Byte offset of `needle` in `haystack`, panicking with context if absent
pub fn offset_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("expected to find {:?} in script", needle))
}

//! Fuzz target for label matching over arbitrary rules and paths.
//!
//! Invariants checked on every input that validates:
//! - every returned label is configured
//! - every returned label has a pattern that prefixes some path

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pathlabel_domain::{classify, prefix_matches};
use std::collections::BTreeMap;

#[derive(Debug, Arbitrary)]
struct Input {
    rules: BTreeMap<String, Vec<String>>,
    paths: Vec<String>,
}

fuzz_target!(|input: Input| {
    let Ok(labels) = classify(input.rules.clone(), &input.paths) else {
        return;
    };

    for label in labels.iter() {
        let patterns = input.rules.get(label).expect("label is configured");
        assert!(
            patterns
                .iter()
                .any(|pat| input.paths.iter().any(|p| prefix_matches(pat, p))),
            "label {label} has no matching path"
        );
    }
});

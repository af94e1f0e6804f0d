use crate::rules::LabelRules;
use pathlabel_types::LabelSet;
use std::collections::BTreeMap;

pub fn raw(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(label, patterns)| {
            (
                label.to_string(),
                patterns.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}

pub fn rules(entries: &[(&str, &[&str])]) -> LabelRules {
    LabelRules::new(raw(entries)).expect("test rules must be valid")
}

pub fn labels(names: &[&str]) -> LabelSet {
    names.iter().copied().collect()
}

use crate::error::ConfigurationError;
use crate::rules::LabelRules;
use pathlabel_types::{LabelMatch, LabelSet};
use std::collections::BTreeMap;

/// The match predicate: literal, case-sensitive prefix comparison on the full path.
///
/// No separator normalization and no glob expansion: `*.test.ts` only matches a
/// path that literally begins with `*.test.ts`.
pub fn prefix_matches(pattern: &str, path: &str) -> bool {
    path.starts_with(pattern)
}

/// Labels whose patterns prefix-match at least one changed path.
pub fn compute_labels<S: AsRef<str>>(rules: &LabelRules, paths: &[S]) -> LabelSet {
    rules
        .iter()
        .filter(|(_, patterns)| first_match(patterns, paths).is_some())
        .map(|(label, _)| label)
        .collect()
}

/// Validate a decoded mapping, then match it against `paths`.
pub fn classify<S: AsRef<str>>(
    rules: BTreeMap<String, Vec<String>>,
    paths: &[S],
) -> Result<LabelSet, ConfigurationError> {
    let rules = LabelRules::new(rules)?;
    Ok(compute_labels(&rules, paths))
}

/// Every `(label, pattern)` that matches a single path, in label then pattern order.
pub fn matches_for_path(rules: &LabelRules, path: &str) -> Vec<LabelMatch> {
    let mut out = Vec::new();
    for (label, patterns) in rules.iter() {
        for pattern in patterns {
            if prefix_matches(pattern, path) {
                out.push(LabelMatch {
                    label: label.to_string(),
                    pattern: pattern.clone(),
                    path: path.to_string(),
                });
            }
        }
    }
    out
}

/// One match per label: patterns are scanned in configured order, paths in supplied order,
/// stopping at the first hit.
pub(crate) fn first_matches<S: AsRef<str>>(rules: &LabelRules, paths: &[S]) -> Vec<LabelMatch> {
    rules
        .iter()
        .filter_map(|(label, patterns)| {
            first_match(patterns, paths).map(|(pattern, path)| LabelMatch {
                label: label.to_string(),
                pattern: pattern.to_string(),
                path: path.to_string(),
            })
        })
        .collect()
}

fn first_match<'a, S: AsRef<str>>(
    patterns: &'a [String],
    paths: &'a [S],
) -> Option<(&'a str, &'a str)> {
    patterns.iter().find_map(|pattern| {
        paths.iter().find_map(|path| {
            let path: &str = path.as_ref();
            prefix_matches(pattern, path).then_some((pattern.as_str(), path))
        })
    })
}

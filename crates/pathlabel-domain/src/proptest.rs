//! Property-based tests for the matcher.
//!
//! These tests use proptest to verify invariants around:
//! - completeness and soundness of the label set
//! - idempotence and input-order independence
//! - overlap and empty-input behavior

use crate::engine::evaluate;
use crate::matcher::{classify, compute_labels, prefix_matches};
use crate::rules::LabelRules;
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

/// Label names: short, non-empty.
fn arb_label() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,7}").unwrap()
}

/// Patterns drawn from a small alphabet so they frequently prefix generated paths.
fn arb_pattern() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ab/][ab/.]{0,4}").unwrap()
}

/// Paths from the same alphabet, occasionally empty.
fn arb_path() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ab/.]{0,10}").unwrap()
}

fn arb_raw_rules() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(
        arb_label(),
        prop::collection::vec(arb_pattern(), 1..4),
        0..6,
    )
}

fn arb_rules() -> impl Strategy<Value = LabelRules> {
    arb_raw_rules().prop_map(|raw| LabelRules::new(raw).expect("generated rules are valid"))
}

fn arb_paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_path(), 0..12)
}

fn label_matches_any(patterns: &[String], paths: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| paths.iter().any(|path| prefix_matches(pattern, path)))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn no_false_negatives(rules in arb_rules(), paths in arb_paths()) {
        let result = compute_labels(&rules, &paths);
        for (label, patterns) in rules.iter() {
            if label_matches_any(patterns, &paths) {
                prop_assert!(result.contains(label), "missing label {label}");
            }
        }
    }

    #[test]
    fn no_false_positives(rules in arb_rules(), paths in arb_paths()) {
        let result = compute_labels(&rules, &paths);
        for label in result.iter() {
            let patterns = rules.patterns(label).expect("result labels come from rules");
            prop_assert!(label_matches_any(patterns, &paths), "unjustified label {label}");
        }
    }

    #[test]
    fn repeated_runs_agree(rules in arb_rules(), paths in arb_paths()) {
        prop_assert_eq!(compute_labels(&rules, &paths), compute_labels(&rules, &paths));
    }

    #[test]
    fn path_order_does_not_change_membership(rules in arb_rules(), paths in arb_paths()) {
        let mut reversed = paths.clone();
        reversed.reverse();
        let mut sorted = paths.clone();
        sorted.sort();

        let expected = compute_labels(&rules, &paths);
        prop_assert_eq!(&compute_labels(&rules, &reversed), &expected);
        prop_assert_eq!(&compute_labels(&rules, &sorted), &expected);
    }

    #[test]
    fn duplicated_paths_do_not_change_membership(rules in arb_rules(), paths in arb_paths()) {
        let doubled: Vec<String> = paths.iter().chain(paths.iter()).cloned().collect();
        prop_assert_eq!(compute_labels(&rules, &doubled), compute_labels(&rules, &paths));
    }

    #[test]
    fn empty_rules_or_paths_yield_nothing(rules in arb_rules(), paths in arb_paths()) {
        prop_assert!(compute_labels(&LabelRules::default(), &paths).is_empty());
        let none: Vec<String> = Vec::new();
        prop_assert!(compute_labels(&rules, &none).is_empty());
    }

    #[test]
    fn overlapping_labels_all_apply(
        first in arb_label(),
        second in arb_label(),
        pattern in arb_pattern(),
        suffix in arb_path(),
    ) {
        prop_assume!(first != second);
        let mut raw = BTreeMap::new();
        raw.insert(first.clone(), vec![pattern.clone()]);
        raw.insert(second.clone(), vec![pattern.clone()]);
        let path = format!("{pattern}{suffix}");

        let result = classify(raw, &[path]).expect("valid rules");
        prop_assert!(result.contains(&first));
        prop_assert!(result.contains(&second));
        prop_assert_eq!(result.len(), 2);
    }

    #[test]
    fn every_reported_match_is_a_real_prefix_match(rules in arb_rules(), paths in arb_paths()) {
        let report = evaluate(&rules, &paths);
        prop_assert_eq!(report.matches.len(), report.labels.len());
        for m in &report.matches {
            prop_assert!(prefix_matches(&m.pattern, &m.path));
            prop_assert!(paths.contains(&m.path));
            let patterns = rules.patterns(&m.label).expect("label exists");
            prop_assert!(patterns.contains(&m.pattern));
        }
    }

    #[test]
    fn any_empty_pattern_is_rejected(
        raw in arb_raw_rules(),
        label in arb_label(),
        position in 0usize..3,
    ) {
        let mut raw = raw;
        let patterns = raw.entry(label).or_insert_with(|| vec!["a".to_string()]);
        let at = position.min(patterns.len());
        patterns.insert(at, String::new());

        prop_assert!(LabelRules::new(raw).is_err());
    }
}

use crate::matcher::first_matches;
use crate::report::DomainReport;
use crate::rules::LabelRules;
use pathlabel_types::{LabelData, LabelSet};

pub fn evaluate<S: AsRef<str>>(rules: &LabelRules, paths: &[S]) -> DomainReport {
    let matches = first_matches(rules, paths);
    let labels: LabelSet = matches.iter().map(|m| m.label.as_str()).collect();

    let data = LabelData {
        labels_configured: rules.len() as u32,
        paths_scanned: paths.len() as u32,
        labels_matched: labels.len() as u32,
    };

    DomainReport {
        labels,
        matches,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_labels;
    use crate::test_support::{labels, rules};

    #[test]
    fn report_carries_labels_matches_and_counts() {
        let rules = rules(&[
            ("frontend", &["src/components/"]),
            ("docs", &["README.md"]),
            ("infra", &["deploy/"]),
        ]);
        let paths = ["src/components/Button.tsx", "README.md", "server/main.go"];

        let report = evaluate(&rules, &paths);

        assert_eq!(report.labels, labels(&["docs", "frontend"]));
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.matches[0].label, "docs");
        assert_eq!(report.matches[0].path, "README.md");
        assert_eq!(report.matches[1].label, "frontend");
        assert_eq!(report.matches[1].pattern, "src/components/");
        assert_eq!(
            report.data,
            LabelData {
                labels_configured: 3,
                paths_scanned: 3,
                labels_matched: 2,
            }
        );
    }

    #[test]
    fn labels_agree_with_compute_labels() {
        let rules = rules(&[("js", &["src/"]), ("ts", &["src/"]), ("none", &["x/"])]);
        let paths = ["src/a.ts", "src/b.js"];
        assert_eq!(evaluate(&rules, &paths).labels, compute_labels(&rules, &paths));
    }

    #[test]
    fn duplicate_paths_are_counted_not_deduplicated() {
        let rules = rules(&[("src", &["src/"])]);
        let report = evaluate(&rules, &["src/a.rs", "src/a.rs"]);
        assert_eq!(report.data.paths_scanned, 2);
        assert_eq!(report.data.labels_matched, 1);
    }
}

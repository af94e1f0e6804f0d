//! Render use cases: markdown and GitHub annotations from in-memory reports.

use pathlabel_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    pathlabel_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    pathlabel_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlabel_render::{RenderableData, RenderableMatch, RenderableOutcome};

    fn sample_report() -> RenderableReport {
        let matched = |label: &str, path: &str| RenderableMatch {
            label: label.to_string(),
            pattern: path.to_string(),
            path: path.to_string(),
        };
        RenderableReport {
            outcome: RenderableOutcome::Applied,
            labels: vec!["docs".to_string(), "infra".to_string()],
            matches: vec![matched("docs", "docs/"), matched("infra", "deploy/")],
            data: RenderableData {
                labels_configured: 2,
                paths_scanned: 2,
            },
            error: None,
        }
    }

    #[test]
    fn render_annotations_respects_max() {
        let report = sample_report();
        let annotations = render_annotations(&report, 1);
        assert_eq!(annotations.len(), 1);
    }

    #[test]
    fn render_markdown_smoke() {
        let report = sample_report();
        let markdown = render_markdown(&report);
        assert!(markdown.contains("`infra`"));
    }
}

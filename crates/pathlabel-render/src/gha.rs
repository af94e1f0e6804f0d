use crate::{RenderableOutcome, RenderableReport};

/// Render a report as GitHub Actions workflow command annotations.
///
/// Format:
/// `::notice file={path}::{message}` per applied label, `::error::{message}` on failure.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    if let Some(err) = &report.error {
        return vec![format!("::error::{}", escape(&format!("[pathlabel] {}", err)))];
    }

    let verb = match report.outcome {
        RenderableOutcome::Applied => "applied",
        _ => "matched",
    };

    let mut out = Vec::new();
    for label in &report.labels {
        let found = report.matches.iter().find(|m| &m.label == label);
        let message = match found {
            Some(m) => format!(
                "[pathlabel] label '{}' {} (prefix '{}')",
                label, verb, m.pattern
            ),
            None => format!("[pathlabel] label '{}' {}", label, verb),
        };
        match found {
            Some(m) => out.push(format!(
                "::notice file={}::{}",
                escape_property(&m.path),
                escape(&message)
            )),
            None => out.push(format!("::notice::{}", escape(&message))),
        }
    }

    out
}

fn escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape(value).replace(':', "%3A").replace(',', "%2C")
}

use crate::{RenderableOutcome, RenderableReport};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Pathlabel report\n\n");
    let outcome = match report.outcome {
        RenderableOutcome::Applied => "APPLIED",
        RenderableOutcome::Matched => "MATCHED",
        RenderableOutcome::NoMatch => "NO MATCH",
        RenderableOutcome::Error => "ERROR",
    };
    out.push_str(&format!(
        "- Outcome: **{}**\n- Labels: {} (matched) / {} (configured)\n- Paths scanned: {}\n\n",
        outcome,
        report.labels.len(),
        report.data.labels_configured,
        report.data.paths_scanned
    ));

    if let Some(err) = &report.error {
        out.push_str(&format!("> Error: {}\n", err));
        return out;
    }

    if report.labels.is_empty() {
        out.push_str("No matching labels.\n");
        return out;
    }

    out.push_str("## Labels\n\n");

    for label in &report.labels {
        match report.matches.iter().find(|m| &m.label == label) {
            Some(m) => out.push_str(&format!(
                "- `{}`: `{}` matched prefix `{}`\n",
                label, m.path, m.pattern
            )),
            None => out.push_str(&format!("- `{}`\n", label)),
        }
    }

    out
}

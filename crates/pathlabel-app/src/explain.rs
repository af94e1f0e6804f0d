//! The `explain` use case: show which labels a given path would receive, and why.

use anyhow::Context;
use pathlabel_settings::ConfigFormat;
use pathlabel_types::LabelMatch;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathExplanation {
    pub path: String,
    /// Every `(label, pattern)` that prefix-matches `path`.
    pub matches: Vec<LabelMatch>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplainOutput {
    pub paths: Vec<PathExplanation>,
}

pub fn run_explain(
    config_text: &str,
    format: ConfigFormat,
    paths: &[String],
) -> anyhow::Result<ExplainOutput> {
    let resolved = pathlabel_settings::load_config(config_text, format).context("load config")?;
    let paths = paths
        .iter()
        .map(|path| PathExplanation {
            path: path.clone(),
            matches: pathlabel_domain::matches_for_path(&resolved.rules, path),
        })
        .collect();
    Ok(ExplainOutput { paths })
}

/// Format an explanation for terminal display.
pub fn format_explanation(output: &ExplainOutput) -> String {
    let mut out = String::new();

    for explained in &output.paths {
        out.push_str(&explained.path);
        out.push('\n');
        if explained.matches.is_empty() {
            out.push_str("  (no labels)\n");
            continue;
        }
        for m in &explained.matches {
            out.push_str(&format!("  {} (prefix '{}')\n", m.label, m.pattern));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[labels]
js = ["src/"]
ts = ["src/", "types/"]
docs = ["README.md"]
"#;

    #[test]
    fn lists_every_matching_label_per_path() {
        let paths = vec!["src/a.ts".to_string(), "src/README.md".to_string()];
        let out = run_explain(CONFIG, ConfigFormat::Toml, &paths).expect("explain");

        assert_eq!(out.paths.len(), 2);
        let labels: Vec<&str> = out.paths[0]
            .matches
            .iter()
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(labels, vec!["js", "ts"]);

        assert_eq!(
            format_explanation(&out),
            "src/a.ts\n  js (prefix 'src/')\n  ts (prefix 'src/')\n\
             src/README.md\n  js (prefix 'src/')\n  ts (prefix 'src/')\n"
        );
    }

    #[test]
    fn unmatched_path_says_so() {
        let out = run_explain(CONFIG, ConfigFormat::Toml, &["server/main.go".to_string()])
            .expect("explain");
        assert_eq!(format_explanation(&out), "server/main.go\n  (no labels)\n");
    }
}

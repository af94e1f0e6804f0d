//! The `validate` use case: parse and validate a config without matching anything.

use anyhow::Context;
use pathlabel_settings::ConfigFormat;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidateOutput {
    /// `(label, pattern count)` in label order.
    pub labels: Vec<(String, usize)>,
}

impl ValidateOutput {
    pub fn pattern_count(&self) -> usize {
        self.labels.iter().map(|(_, n)| n).sum()
    }
}

pub fn run_validate(config_text: &str, format: ConfigFormat) -> anyhow::Result<ValidateOutput> {
    let resolved = pathlabel_settings::load_config(config_text, format).context("load config")?;
    let labels = resolved
        .rules
        .iter()
        .map(|(label, patterns)| (label.to_string(), patterns.len()))
        .collect();
    Ok(ValidateOutput { labels })
}

//! The `label` use case: resolve rules, gather changed paths, match, submit.

use anyhow::Context;
use pathlabel_domain::ConfigurationError;
use pathlabel_settings::{ConfigFormat, SettingsError};
use pathlabel_types::{LabelReport, LabelSet, Outcome};
use time::OffsetDateTime;
use tracing::info;

use crate::report::build_report;
use crate::source::{ChangeSource, LabelSink};

/// Input for the label use case.
pub struct LabelInput<'a> {
    /// Config file contents.
    pub config_text: &'a str,
    pub config_format: ConfigFormat,
    /// Where changed paths come from.
    pub source: &'a dyn ChangeSource,
    /// Where labels go; `None` computes without submitting (dry run, offline match).
    pub sink: Option<&'a dyn LabelSink>,
}

/// Output from the label use case.
#[derive(Clone, Debug)]
pub struct LabelOutput {
    pub report: LabelReport,
    pub labels: LabelSet,
}

/// Run the label use case: parse config, fetch paths, compute labels, submit if any matched.
pub fn run_label(input: LabelInput<'_>) -> anyhow::Result<LabelOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = pathlabel_settings::load_config(input.config_text, input.config_format)
        .context("load config")?;
    info!(labels = resolved.rules.len(), "loaded label rules");

    let paths = input
        .source
        .changed_paths()
        .context("fetch changed paths")?;
    info!(paths = paths.len(), "fetched changed paths");

    let domain = pathlabel_domain::evaluate(&resolved.rules, &paths);
    let labels = domain.labels.clone();

    let outcome = if labels.is_empty() {
        info!("no matching labels");
        Outcome::NoMatch
    } else if let Some(sink) = input.sink {
        sink.apply_labels(&labels).context("submit labels")?;
        info!(labels = %joined(&labels), "{} labels applied", labels.len());
        Outcome::Applied
    } else {
        info!(labels = %joined(&labels), "{} labels matched (not submitted)", labels.len());
        Outcome::Matched
    };

    let report = build_report(started_at, outcome, input.source.meta(), domain);
    Ok(LabelOutput { report, labels })
}

/// Whether a failure came from unusable configuration rather than the environment.
pub fn is_config_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|e| e.is::<SettingsError>() || e.is::<ConfigurationError>())
}

/// Map an outcome to a process exit code: 0 = labels applied/matched or none matched,
/// 1 = runtime error. Configuration errors exit with 2 (see [`is_config_error`]).
pub fn outcome_exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Applied | Outcome::Matched | Outcome::NoMatch => 0,
        Outcome::Error => 1,
    }
}

fn joined(labels: &LabelSet) -> String {
    labels.iter().collect::<Vec<_>>().join(",")
}

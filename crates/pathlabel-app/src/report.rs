use anyhow::Context;
use pathlabel_domain::report::DomainReport;
use pathlabel_render::{RenderableData, RenderableMatch, RenderableOutcome, RenderableReport};
use pathlabel_types::{
    LabelData, LabelReport, LabelSet, Outcome, ReportError, RunMeta, SCHEMA_REPORT_V1,
    SourceMeta, ToolMeta, ids,
};
use time::OffsetDateTime;

use crate::label::is_config_error;

pub(crate) fn build_report(
    started_at: OffsetDateTime,
    outcome: Outcome,
    source: SourceMeta,
    domain: DomainReport,
) -> LabelReport {
    let DomainReport {
        labels,
        matches,
        data,
    } = domain;

    LabelReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: run_meta(started_at),
        outcome,
        source,
        labels,
        matches,
        data,
        error: None,
    }
}

/// Report written when an invocation fails; the error code tells configuration
/// problems apart from runtime failures.
pub fn error_report(
    started_at: OffsetDateTime,
    source: SourceMeta,
    err: &anyhow::Error,
) -> LabelReport {
    let code = if is_config_error(err) {
        ids::CODE_CONFIG_INVALID
    } else {
        ids::CODE_RUNTIME_ERROR
    };

    LabelReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: run_meta(started_at),
        outcome: Outcome::Error,
        source,
        labels: LabelSet::new(),
        matches: Vec::new(),
        data: LabelData::default(),
        error: Some(ReportError {
            code: code.to_string(),
            message: format!("{err:#}"),
        }),
    }
}

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: ids::TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn run_meta(started_at: OffsetDateTime) -> RunMeta {
    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;
    RunMeta {
        started_at,
        ended_at: Some(ended_at),
        duration_ms: Some(duration_ms),
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<LabelReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse pathlabel report")
}

pub fn serialize_report(report: &LabelReport) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

pub fn to_renderable(report: &LabelReport) -> RenderableReport {
    RenderableReport {
        outcome: match report.outcome {
            Outcome::Applied => RenderableOutcome::Applied,
            Outcome::Matched => RenderableOutcome::Matched,
            Outcome::NoMatch => RenderableOutcome::NoMatch,
            Outcome::Error => RenderableOutcome::Error,
        },
        labels: report.labels.to_vec(),
        matches: report
            .matches
            .iter()
            .map(|m| RenderableMatch {
                label: m.label.clone(),
                pattern: m.pattern.clone(),
                path: m.path.clone(),
            })
            .collect(),
        data: RenderableData {
            labels_configured: report.data.labels_configured,
            paths_scanned: report.data.paths_scanned,
        },
        error: report.error.as_ref().map(|e| e.message.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlabel_domain::ConfigurationError;
    use pathlabel_types::{LabelMatch, SourceKind};

    fn sample() -> LabelReport {
        let domain = DomainReport {
            labels: ["docs"].into_iter().collect(),
            matches: vec![LabelMatch {
                label: "docs".to_string(),
                pattern: "README.md".to_string(),
                path: "README.md".to_string(),
            }],
            data: LabelData {
                labels_configured: 2,
                paths_scanned: 3,
                labels_matched: 1,
            },
        };
        build_report(
            OffsetDateTime::now_utc(),
            Outcome::Matched,
            SourceMeta::new(SourceKind::Files),
            domain,
        )
    }

    #[test]
    fn serialized_report_parses_back() {
        let report = sample();
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.ends_with("}\n"));

        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.labels, report.labels);
        assert_eq!(parsed.outcome, Outcome::Matched);
    }

    #[test]
    fn foreign_schema_is_rejected() {
        let err = parse_report_json(r#"{"schema":"sensor.report.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));
    }

    #[test]
    fn config_errors_get_config_code() {
        let err = anyhow::Error::new(ConfigurationError::EmptyLabel).context("load config");
        let report = error_report(
            OffsetDateTime::now_utc(),
            SourceMeta::new(SourceKind::Files),
            &err,
        );
        let error = report.error.expect("error block");
        assert_eq!(error.code, ids::CODE_CONFIG_INVALID);
        assert_eq!(error.message, "load config: label name must not be empty");
        assert_eq!(report.outcome, Outcome::Error);
    }

    #[test]
    fn other_errors_get_runtime_code() {
        let err = anyhow::anyhow!("connection refused");
        let report = error_report(
            OffsetDateTime::now_utc(),
            SourceMeta::new(SourceKind::Github),
            &err,
        );
        assert_eq!(
            report.error.expect("error block").code,
            ids::CODE_RUNTIME_ERROR
        );
    }

    #[test]
    fn renderable_carries_matches_and_error() {
        let renderable = to_renderable(&sample());
        assert_eq!(renderable.outcome, RenderableOutcome::Matched);
        assert_eq!(renderable.labels, vec!["docs"]);
        assert_eq!(renderable.matches[0].pattern, "README.md");
        assert_eq!(renderable.data.labels_configured, 2);
        assert!(renderable.error.is_none());
    }
}

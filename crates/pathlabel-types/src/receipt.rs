use crate::{LabelMatch, LabelSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifiers.
pub const SCHEMA_REPORT_V1: &str = "pathlabel.report.v1";
pub const SCHEMA_CONFIG_V1: &str = "pathlabel.config.v1";

/// How an invocation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Labels matched and were submitted to the label sink.
    Applied,
    /// Labels matched but nothing was submitted (dry run or offline match).
    Matched,
    /// No label matched any changed path.
    NoMatch,
    /// The invocation failed; see `LabelReport.error`.
    Error,
}

/// Where the changed paths came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Github,
    Files,
    Git,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceMeta {
    pub kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<u64>,
}

impl SourceMeta {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            repository: None,
            pull_request: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Summary counters for one matching run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LabelData {
    pub labels_configured: u32,
    pub paths_scanned: u32,
    pub labels_matched: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportError {
    pub code: String,
    pub message: String,
}

/// The `pathlabel.report.v1` envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LabelReport {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub outcome: Outcome,
    pub source: SourceMeta,
    pub labels: LabelSet,
    #[serde(default)]
    pub matches: Vec<LabelMatch>,
    pub data: LabelData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

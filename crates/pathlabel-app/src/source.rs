//! Collaborator seams: where changed paths come from and where labels go.

use anyhow::Context;
use pathlabel_github::GitHubClient;
use pathlabel_types::{LabelSet, SourceKind, SourceMeta};

/// Supplies the changed paths of one review request, already flattened.
pub trait ChangeSource {
    fn meta(&self) -> SourceMeta;
    fn changed_paths(&self) -> anyhow::Result<Vec<String>>;
}

/// Receives the computed labels. Only called with a non-empty set.
pub trait LabelSink {
    fn apply_labels(&self, labels: &LabelSet) -> anyhow::Result<()>;
}

/// Paths gathered up front (from a file list, stdin, or `git diff`).
#[derive(Clone, Debug)]
pub struct StaticPaths {
    meta: SourceMeta,
    paths: Vec<String>,
}

impl StaticPaths {
    pub fn new(kind: SourceKind, paths: Vec<String>) -> Self {
        Self {
            meta: SourceMeta::new(kind),
            paths,
        }
    }
}

impl ChangeSource for StaticPaths {
    fn meta(&self) -> SourceMeta {
        self.meta.clone()
    }

    fn changed_paths(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.paths.clone())
    }
}

/// Files of a GitHub pull request.
pub struct PullRequestFiles<'a> {
    client: &'a GitHubClient,
    number: u64,
}

impl<'a> PullRequestFiles<'a> {
    pub fn new(client: &'a GitHubClient, number: u64) -> Self {
        Self { client, number }
    }
}

impl ChangeSource for PullRequestFiles<'_> {
    fn meta(&self) -> SourceMeta {
        SourceMeta {
            kind: SourceKind::Github,
            repository: Some(self.client.repository().to_string()),
            pull_request: Some(self.number),
        }
    }

    fn changed_paths(&self) -> anyhow::Result<Vec<String>> {
        self.client
            .list_pull_request_files(self.number)
            .with_context(|| format!("list files of pull request #{}", self.number))
    }
}

/// Labels added to a GitHub pull request.
pub struct PullRequestLabels<'a> {
    client: &'a GitHubClient,
    number: u64,
}

impl<'a> PullRequestLabels<'a> {
    pub fn new(client: &'a GitHubClient, number: u64) -> Self {
        Self { client, number }
    }
}

impl LabelSink for PullRequestLabels<'_> {
    fn apply_labels(&self, labels: &LabelSet) -> anyhow::Result<()> {
        self.client
            .add_labels(self.number, &labels.to_vec())
            .with_context(|| format!("add labels to pull request #{}", self.number))?;
        Ok(())
    }
}

/// Parse a newline-separated path list. Blank lines are skipped and surrounding
/// whitespace (including `\r`) is trimmed; nothing else is normalized.
pub fn parse_path_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

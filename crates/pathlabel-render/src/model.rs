#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableOutcome {
    Applied,
    Matched,
    NoMatch,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableMatch {
    pub label: String,
    pub pattern: String,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub labels_configured: u32,
    pub paths_scanned: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub outcome: RenderableOutcome,
    /// Sorted label names.
    pub labels: Vec<String>,
    pub matches: Vec<RenderableMatch>,
    pub data: RenderableData,
    pub error: Option<String>,
}

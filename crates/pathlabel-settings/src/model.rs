use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `pathlabel.toml` schema v1.
///
/// ```toml
/// [labels]
/// frontend = ["src/components/"]
/// docs = ["README.md", "docs/"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PathlabelConfigV1 {
    /// Optional schema string for tooling (`pathlabel.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Map of label -> literal path prefixes. A label applies when any changed
    /// path starts with any of its prefixes.
    #[serde(default)]
    pub labels: BTreeMap<String, Vec<String>>,
}

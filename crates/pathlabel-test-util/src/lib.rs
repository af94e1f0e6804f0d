//! Shared test utilities for the pathlabel workspace.
//!
//! `xtask` needs `normalize_nondeterministic` at runtime, so this lives in its
//! own crate rather than behind `#[cfg(test)]`.

use serde_json::Value;

const VERSION_PLACEHOLDER: &str = "__VERSION__";
const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

/// Normalize non-deterministic report fields for golden-file comparison.
///
/// `tool.version` is replaced only on a root object that looks like a report
/// (has `schema`, `tool`, `run`, `outcome` and `labels`). Timestamps and
/// `duration_ms` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_report = ["schema", "tool", "run", "outcome", "labels"]
            .iter()
            .all(|key| obj.contains_key(*key));
        if is_report
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_run_timing(&mut value);
    value
}

fn normalize_run_timing(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "ended_at"] {
                if let Some(slot) = map.get_mut(key)
                    && !slot.is_null()
                {
                    *slot = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            if let Some(slot) = map.get_mut("duration_ms")
                && !slot.is_null()
            {
                *slot = Value::Number(0.into());
            }
            for val in map.values_mut() {
                normalize_run_timing(val);
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(normalize_run_timing),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_version_and_timing_are_normalized() {
        let input = json!({
            "schema": "pathlabel.report.v1",
            "tool": { "name": "pathlabel", "version": "0.1.0" },
            "run": {
                "started_at": "2026-01-01T00:00:00Z",
                "ended_at": "2026-01-01T00:00:01Z",
                "duration_ms": 1000
            },
            "outcome": "matched",
            "labels": ["docs"]
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "pathlabel");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["ended_at"], "__TIMESTAMP__");
        assert_eq!(result["run"]["duration_ms"], 0);
        assert_eq!(result["labels"][0], "docs");
    }

    #[test]
    fn non_report_root_keeps_tool_version() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "run": { "started_at": "2026-01-01T00:00:00Z" }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "2.0.0");
        assert_eq!(result["run"]["started_at"], "__TIMESTAMP__");
    }

    #[test]
    fn absent_timing_stays_absent() {
        let result = normalize_nondeterministic(json!({ "run": { "started_at": "x" } }));
        assert!(result["run"].get("ended_at").is_none());
        assert!(result["run"].get("duration_ms").is_none());
    }
}

use anyhow::Context;
use serde_json::Value;

/// Extract the pull request number from a GitHub Actions event payload
/// (the JSON file at `GITHUB_EVENT_PATH`).
pub fn pull_request_number_from_event(event_json: &str) -> anyhow::Result<u64> {
    let event: Value = serde_json::from_str(event_json).context("parse event payload")?;
    event
        .pointer("/pull_request/number")
        .or_else(|| event.get("number"))
        .and_then(Value::as_u64)
        .context("event payload has no pull request number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_pull_request_number() {
        let event = r#"{"action":"opened","number":42,"pull_request":{"number":42}}"#;
        assert_eq!(pull_request_number_from_event(event).expect("number"), 42);
    }

    #[test]
    fn falls_back_to_top_level_number() {
        assert_eq!(
            pull_request_number_from_event(r#"{"number":7}"#).expect("number"),
            7
        );
    }

    #[test]
    fn push_events_have_no_number() {
        let err = pull_request_number_from_event(r#"{"ref":"refs/heads/main"}"#).unwrap_err();
        assert!(err.to_string().contains("no pull request number"));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(pull_request_number_from_event("not json").is_err());
    }
}

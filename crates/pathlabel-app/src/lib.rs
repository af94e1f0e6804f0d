//! Use case orchestration for pathlabel.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! GitHub, and render layers. It is intentionally thin and delegates heavy lifting to them.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod event;
mod explain;
mod label;
mod render;
mod report;
mod source;
mod validate;

pub use event::pull_request_number_from_event;
pub use explain::{ExplainOutput, PathExplanation, format_explanation, run_explain};
pub use label::{LabelInput, LabelOutput, is_config_error, outcome_exit_code, run_label};
pub use render::{render_annotations, render_markdown};
pub use report::{error_report, parse_report_json, serialize_report, to_renderable};
pub use source::{
    ChangeSource, LabelSink, PullRequestFiles, PullRequestLabels, StaticPaths, parse_path_list,
};
pub use validate::{ValidateOutput, run_validate};

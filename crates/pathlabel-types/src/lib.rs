//! Stable DTOs and IDs used across the pathlabel workspace.
//!
//! This crate is intentionally boring:
//! - the label set produced by matching
//! - the emitted report envelope
//! - stable schema ids and error codes

#![forbid(unsafe_code)]

pub mod ids;
pub mod label;
pub mod receipt;

pub use label::{LabelMatch, LabelSet};
pub use receipt::{
    LabelData, LabelReport, Outcome, ReportError, RunMeta, SCHEMA_CONFIG_V1, SCHEMA_REPORT_V1,
    SourceKind, SourceMeta, ToolMeta,
};

//! Stable identifiers for report error codes and tool metadata.
//!
//! Codes are short snake_case discriminators; they are part of the report contract.

pub const TOOL_NAME: &str = "pathlabel";

// Error codes carried in `LabelReport.error.code`.
pub const CODE_CONFIG_INVALID: &str = "config_invalid";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

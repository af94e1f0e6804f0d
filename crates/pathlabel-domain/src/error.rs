use thiserror::Error;

/// Label rules that cannot be matched against.
///
/// Distinct from an empty result: callers must be able to tell
/// "no labels matched" apart from "the rules were malformed".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("label name must not be empty")]
    EmptyLabel,

    #[error("label '{label}' has no path patterns")]
    EmptyPatternList { label: String },

    #[error("label '{label}' has an empty path pattern at index {index}")]
    EmptyPattern { label: String, index: usize },
}

//! Pure label matching (no IO).
//!
//! Input: validated label rules and the changed paths of one review request.
//! Output: the set of labels to apply, plus the matches that justify them.

#![forbid(unsafe_code)]

pub mod error;
pub mod report;
pub mod rules;

mod engine;
mod matcher;

pub use engine::evaluate;
pub use error::ConfigurationError;
pub use matcher::{classify, compute_labels, matches_for_path, prefix_matches};
pub use rules::LabelRules;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;

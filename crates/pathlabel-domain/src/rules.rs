use crate::error::ConfigurationError;
use std::collections::BTreeMap;

/// Validated mapping of label name to literal path-prefix patterns.
///
/// The only way to obtain a value is through [`LabelRules::new`] (or `TryFrom`),
/// so every instance satisfies:
/// - no label name is empty
/// - every label has at least one pattern
/// - no pattern is empty
///
/// Pattern order within a label is preserved; label order is not significant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelRules {
    rules: BTreeMap<String, Vec<String>>,
}

impl LabelRules {
    /// Validate a decoded mapping. The first violation (in label order) is reported.
    pub fn new(rules: BTreeMap<String, Vec<String>>) -> Result<Self, ConfigurationError> {
        for (label, patterns) in &rules {
            if label.is_empty() {
                return Err(ConfigurationError::EmptyLabel);
            }
            if patterns.is_empty() {
                return Err(ConfigurationError::EmptyPatternList {
                    label: label.clone(),
                });
            }
            if let Some(index) = patterns.iter().position(String::is_empty) {
                return Err(ConfigurationError::EmptyPattern {
                    label: label.clone(),
                    index,
                });
            }
        }
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `(label, patterns)` pairs, labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rules
            .iter()
            .map(|(label, patterns)| (label.as_str(), patterns.as_slice()))
    }

    pub fn patterns(&self, label: &str) -> Option<&[String]> {
        self.rules.get(label).map(Vec::as_slice)
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for LabelRules {
    type Error = ConfigurationError;

    fn try_from(value: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::raw;

    #[test]
    fn accepts_well_formed_rules() {
        let rules = LabelRules::new(raw(&[
            ("docs", &["README.md", "docs/"]),
            ("frontend", &["src/components/"]),
        ]))
        .expect("valid rules");

        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules.patterns("docs"),
            Some(&["README.md".to_string(), "docs/".to_string()][..])
        );
        assert_eq!(
            rules.iter().map(|(l, _)| l).collect::<Vec<_>>(),
            vec!["docs", "frontend"]
        );
    }

    #[test]
    fn empty_mapping_is_valid() {
        let rules = LabelRules::new(BTreeMap::new()).expect("empty rules are valid");
        assert!(rules.is_empty());
    }

    #[test]
    fn rejects_empty_label() {
        let err = LabelRules::new(raw(&[("", &["a/"])])).unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyLabel);
    }

    #[test]
    fn rejects_empty_pattern_list() {
        let err = LabelRules::new(raw(&[("x", &[])])).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::EmptyPatternList {
                label: "x".to_string()
            }
        );
    }

    #[test]
    fn rejects_empty_pattern_and_reports_its_index() {
        let err = LabelRules::new(raw(&[("x", &["src/", ""])])).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::EmptyPattern {
                label: "x".to_string(),
                index: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "label 'x' has an empty path pattern at index 1"
        );
    }

    #[test]
    fn one_bad_label_rejects_the_whole_mapping() {
        let result = LabelRules::try_from(raw(&[("good", &["src/"]), ("bad", &[""])]));
        assert!(result.is_err());
    }
}

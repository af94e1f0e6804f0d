use pathlabel_types::{LabelData, LabelMatch, LabelSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainReport {
    pub labels: LabelSet,
    /// The first match per applied label, in label order.
    pub matches: Vec<LabelMatch>,
    pub data: LabelData,
}

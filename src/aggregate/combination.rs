use crate::core::Table;
use serde::Serialize;

/// Rows offering both online ordering and table booking, against the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureCombination {
    pub both: usize,
    pub other: usize,
}

impl FeatureCombination {
    pub fn total(&self) -> usize {
        self.both + self.other
    }
}

/// Count rows where `online_order == Yes` and `book_table == Yes`.
///
/// `both + other` always equals the number of rows in `table`.
pub fn feature_combination(table: &Table) -> FeatureCombination {
    let both = table.iter().filter(|r| r.has_both_features()).count();
    FeatureCombination {
        both,
        other: table.len() - both,
    }
}

//! Data-quality bookkeeping collected while normalizing.

use crate::config::RowPolicy;
use serde::Serialize;

/// Per-column count of cells that failed to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldFailures {
    pub rating: usize,
    pub votes: usize,
    pub cost_for_two: usize,
}

impl FieldFailures {
    pub fn total(&self) -> usize {
        self.rating + self.votes + self.cost_for_two
    }
}

/// A Yes/No cell outside the alias table, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrecognizedValue {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub column: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataQualityReport {
    pub policy: RowPolicy,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    /// Rows kept in lenient mode with votes defaulted to 0
    pub votes_defaulted: usize,
    pub failures: FieldFailures,
    pub unrecognized_flags: Vec<UnrecognizedValue>,
    /// `(canonical, source header)` pairs
    pub column_mapping: Vec<(String, String)>,
    pub missing_columns: Vec<String>,
    pub extra_columns: Vec<String>,
}

impl DataQualityReport {
    pub fn has_concerns(&self) -> bool {
        self.rows_dropped > 0
            || self.failures.total() > 0
            || !self.unrecognized_flags.is_empty()
            || !self.missing_columns.is_empty()
    }
}

//! Filter engine.
//!
//! A [`FilterSpec`] is a conjunction of category membership and inclusive
//! numeric range predicates. Applying it never mutates the input table and
//! always preserves relative row order.

pub mod range;
pub mod selection;

pub use range::{Bounds, NumericRange};
pub use selection::{CategorySelection, ALL_OPTION};

use crate::core::{CategoryField, NumericField, Record, Table, YesNo};
use serde::{Deserialize, Serialize};

/// The user's current selection.
///
/// Unset dimensions impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub service_types: CategorySelection,
    #[serde(default)]
    pub online_order: CategorySelection,
    #[serde(default)]
    pub book_table: CategorySelection,
    #[serde(default)]
    pub rating: Option<NumericRange>,
    #[serde(default)]
    pub cost_for_two: Option<NumericRange>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.service_types = CategorySelection::only(types);
        self
    }

    pub fn with_online_order(mut self, value: YesNo) -> Self {
        self.online_order = CategorySelection::only([value.as_str()]);
        self
    }

    pub fn with_book_table(mut self, value: YesNo) -> Self {
        self.book_table = CategorySelection::only([value.as_str()]);
        self
    }

    pub fn with_rating(mut self, range: NumericRange) -> Self {
        self.rating = Some(range);
        self
    }

    pub fn with_cost(mut self, range: NumericRange) -> Self {
        self.cost_for_two = Some(range);
        self
    }

    /// True when no dimension is set at all.
    pub fn is_unrestricted(&self) -> bool {
        self.service_types.is_unrestricted()
            && self.online_order.is_unrestricted()
            && self.book_table.is_unrestricted()
            && self.rating.is_none()
            && self.cost_for_two.is_none()
    }

    fn selection(&self, field: CategoryField) -> &CategorySelection {
        match field {
            CategoryField::ServiceType => &self.service_types,
            CategoryField::OnlineOrder => &self.online_order,
            CategoryField::BookTable => &self.book_table,
        }
    }
}

/// Range predicates that still constrain `table` after dropping those
/// spanning its full observed bounds.
fn active_ranges(table: &Table, spec: &FilterSpec) -> Vec<(NumericField, NumericRange)> {
    [
        (NumericField::Rating, spec.rating),
        (NumericField::CostForTwo, spec.cost_for_two),
    ]
    .into_iter()
    .filter_map(|(field, range)| range.map(|r| (field, r)))
    .filter(|(field, range)| !range.covers(Bounds::observe(table, *field)))
    .collect()
}

fn passes(record: &Record, spec: &FilterSpec, ranges: &[(NumericField, NumericRange)]) -> bool {
    CategoryField::ALL
        .iter()
        .all(|field| spec.selection(*field).allows(record.category(*field)))
        && ranges
            .iter()
            .all(|(field, range)| range.contains(record.numeric(*field)))
}

/// Apply a filter spec to a table (pure).
///
/// # Arguments
///
/// * `table` - Table to filter; not modified
/// * `spec` - Predicates combined with logical AND
///
/// # Returns
///
/// A new table holding the passing rows in their original relative order
pub fn apply(table: &Table, spec: &FilterSpec) -> Table {
    if spec.is_unrestricted() {
        return table.clone();
    }

    let ranges = active_ranges(table, spec);
    let filtered = table.select(|record| passes(record, spec, &ranges));

    log::debug!(
        "Filter kept {} of {} rows ({} active range predicates)",
        filtered.len(),
        table.len(),
        ranges.len()
    );

    filtered
}

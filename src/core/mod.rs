pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical column names, in export order.
pub const CANONICAL_COLUMNS: [&str; 7] = [
    "name",
    "rate",
    "votes",
    "cost_for_two",
    "restaurant_type",
    "online_order",
    "book_table",
];

/// Closed set for the online-order and table-booking flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric columns the aggregator can reason about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Rating,
    Votes,
    CostForTwo,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [Self::Rating, Self::Votes, Self::CostForTwo];

    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Rating => "rate",
            Self::Votes => "votes",
            Self::CostForTwo => "cost_for_two",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Categorical columns usable for membership filters and grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    ServiceType,
    OnlineOrder,
    BookTable,
}

impl CategoryField {
    pub const ALL: [CategoryField; 3] = [Self::ServiceType, Self::OnlineOrder, Self::BookTable];

    pub fn column_name(&self) -> &'static str {
        match self {
            Self::ServiceType => "restaurant_type",
            Self::OnlineOrder => "online_order",
            Self::BookTable => "book_table",
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One normalized restaurant listing.
///
/// Produced once by the normalizer; everything downstream works on this
/// typed form and never on the raw strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    /// Always within [0.0, 5.0] when present.
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    /// Never negative when present.
    pub cost_for_two: Option<f64>,
    pub service_type: String,
    pub online_order: Option<YesNo>,
    pub book_table: Option<YesNo>,
    /// Values of pass-through columns, aligned with [`Table::extra_columns`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
}

impl Record {
    pub fn new(name: impl Into<String>, service_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating: None,
            votes: None,
            cost_for_two: None,
            service_type: service_type.into(),
            online_order: None,
            book_table: None,
            extras: Vec::new(),
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_votes(mut self, votes: u64) -> Self {
        self.votes = Some(votes);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost_for_two = Some(cost);
        self
    }

    pub fn with_flags(mut self, online_order: YesNo, book_table: YesNo) -> Self {
        self.online_order = Some(online_order);
        self.book_table = Some(book_table);
        self
    }

    /// Value of a numeric column as `f64`, if present.
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Rating => self.rating,
            NumericField::Votes => self.votes.map(|v| v as f64),
            NumericField::CostForTwo => self.cost_for_two,
        }
    }

    /// Value of a categorical column, if present.
    pub fn category(&self, field: CategoryField) -> Option<&str> {
        match field {
            CategoryField::ServiceType => Some(self.service_type.as_str()),
            CategoryField::OnlineOrder => self.online_order.as_ref().map(YesNo::as_str),
            CategoryField::BookTable => self.book_table.as_ref().map(YesNo::as_str),
        }
    }

    /// Both online ordering and table booking are offered.
    pub fn has_both_features(&self) -> bool {
        self.online_order.is_some_and(|f| f.is_yes()) && self.book_table.is_some_and(|f| f.is_yes())
    }
}

/// Ordered, immutable collection of records.
///
/// Row order is source file order. Filtering builds a new table; the base
/// table is never mutated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    extra_columns: Vec<String>,
    /// Canonical columns the source had no header for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    absent_columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            extra_columns: Vec::new(),
            absent_columns: Vec::new(),
            records,
        }
    }

    pub fn with_extra_columns(extra_columns: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            extra_columns,
            absent_columns: Vec::new(),
            records,
        }
    }

    /// Mark canonical columns as missing from the source file.
    pub fn with_absent_columns(mut self, absent_columns: Vec<String>) -> Self {
        self.absent_columns = absent_columns;
        self
    }

    /// A table with the same column layout holding `records`.
    pub fn derive(&self, records: Vec<Record>) -> Table {
        Table {
            extra_columns: self.extra_columns.clone(),
            absent_columns: self.absent_columns.clone(),
            records,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn absent_columns(&self) -> &[String] {
        &self.absent_columns
    }

    /// Canonical columns present in the source, in export order.
    pub fn present_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        CANONICAL_COLUMNS
            .into_iter()
            .filter(|c| !self.absent_columns.iter().any(|a| a == c))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Build a new table of the records matching `predicate`, keeping order
    /// and pass-through columns.
    pub fn select<P>(&self, predicate: P) -> Table
    where
        P: Fn(&Record) -> bool,
    {
        self.derive(self.records.iter().filter(|r| predicate(r)).cloned().collect())
    }

    /// Observed values of a numeric column, skipping absent cells.
    pub fn values(&self, field: NumericField) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(move |r| r.numeric(field))
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

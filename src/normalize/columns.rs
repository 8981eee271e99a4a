//! Header aliasing: maps the header variants seen in the wild onto the
//! canonical column set.

use serde::Serialize;
use std::collections::BTreeMap;

/// Canonical input columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Rate,
    Votes,
    CostForTwo,
    RestaurantType,
    OnlineOrder,
    BookTable,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Self::Name,
        Self::Rate,
        Self::Votes,
        Self::CostForTwo,
        Self::RestaurantType,
        Self::OnlineOrder,
        Self::BookTable,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rate => "rate",
            Self::Votes => "votes",
            Self::CostForTwo => "cost_for_two",
            Self::RestaurantType => "restaurant_type",
            Self::OnlineOrder => "online_order",
            Self::BookTable => "book_table",
        }
    }

    /// Built-in header spellings, compared after trimming and lowercasing.
    fn builtin_aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name", "restaurant_name"],
            Self::Rate => &["rate", "rating"],
            Self::Votes => &["votes"],
            Self::CostForTwo => &[
                "cost_for_two",
                "approx_cost(for two people)",
                "approx_cost",
                "cost",
            ],
            Self::RestaurantType => &["restaurant_type", "listed_in(type)", "type"],
            Self::OnlineOrder => &["online_order"],
            Self::BookTable => &["book_table"],
        }
    }

    pub fn from_canonical_name(name: &str) -> Option<Column> {
        Self::ALL.into_iter().find(|c| c.canonical_name() == name)
    }
}

fn header_key(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Resolved positions of the canonical columns within a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    positions: BTreeMap<Column, usize>,
    extras: Vec<usize>,
}

impl ColumnMap {
    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions.get(&column).copied()
    }

    pub fn has(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    /// Positions of pass-through columns, in header order.
    pub fn extra_positions(&self) -> &[usize] {
        &self.extras
    }

    /// Canonical columns with no matching header.
    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.positions.contains_key(c))
            .collect()
    }

    /// `(canonical name, source header)` pairs for reporting.
    pub fn describe(&self, headers: &[String]) -> Vec<(String, String)> {
        self.positions
            .iter()
            .filter_map(|(column, &index)| {
                headers
                    .get(index)
                    .map(|h| (column.canonical_name().to_string(), h.clone()))
            })
            .collect()
    }
}

/// Resolve a header row against the built-in and configured aliases.
///
/// The first header matching a column wins; any later header matching the
/// same column is passed through as an extra column. Configured aliases for
/// unknown canonical names are ignored with a warning.
pub fn resolve_columns(headers: &[String], extra_aliases: &BTreeMap<String, Vec<String>>) -> ColumnMap {
    for name in extra_aliases.keys() {
        if Column::from_canonical_name(name).is_none() {
            log::warn!("Ignoring aliases for unknown column '{}'", name);
        }
    }

    let matches = |column: Column, key: &str| -> bool {
        column.builtin_aliases().contains(&key)
            || extra_aliases
                .get(column.canonical_name())
                .is_some_and(|aliases| aliases.iter().any(|a| header_key(a) == key))
    };

    let mut map = ColumnMap::default();
    for (index, header) in headers.iter().enumerate() {
        let key = header_key(header);
        let column = Column::ALL.into_iter().find(|c| matches(*c, &key));

        match column {
            Some(column) if !map.positions.contains_key(&column) => {
                map.positions.insert(column, index);
            }
            Some(column) => {
                log::warn!(
                    "Header '{}' duplicates column '{}'; passing it through unchanged",
                    header,
                    column.canonical_name()
                );
                map.extras.push(index);
            }
            None => map.extras.push(index),
        }
    }

    map
}

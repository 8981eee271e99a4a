use crate::core::{CategoryField, Table};
use crate::filter::ALL_OPTION;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Frequency of each distinct value of a category column (pure).
///
/// Ordered by descending count; equal counts keep first-seen order. Rows
/// without a value for the column are not counted.
pub fn category_counts(table: &Table, field: CategoryField) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for value in table.iter().filter_map(|r| r.category(field)) {
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(CategoryCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order survives among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Picker options for the restaurant type: `"All"` followed by the sorted
/// distinct values.
pub fn service_type_options(table: &Table) -> Vec<String> {
    let distinct: BTreeSet<&str> = table.iter().map(|r| r.service_type.as_str()).collect();
    std::iter::once(ALL_OPTION.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Record, YesNo};

    fn count(value: &str, count: usize) -> CategoryCount {
        CategoryCount {
            value: value.to_string(),
            count,
        }
    }

    #[test]
    fn test_counts_descending_with_first_seen_ties() {
        let table = Table::new(vec![
            Record::new("a", "Buffet"),
            Record::new("b", "Cafe"),
            Record::new("c", "Dining"),
            Record::new("d", "Cafe"),
            Record::new("e", "Dining"),
            Record::new("f", "Other"),
        ]);

        assert_eq!(
            category_counts(&table, CategoryField::ServiceType),
            vec![
                count("Cafe", 2),
                count("Dining", 2),
                count("Buffet", 1),
                count("Other", 1),
            ]
        );
    }

    #[test]
    fn test_counts_skip_absent_flags() {
        let mut unset = Record::new("c", "Cafe");
        unset.online_order = None;
        let table = Table::new(vec![
            Record::new("a", "Cafe").with_flags(YesNo::No, YesNo::No),
            Record::new("b", "Cafe").with_flags(YesNo::Yes, YesNo::No),
            unset,
        ]);

        let counts = category_counts(&table, CategoryField::OnlineOrder);
        assert_eq!(counts, vec![count("No", 1), count("Yes", 1)]);
    }

    #[test]
    fn test_counts_on_empty_table() {
        assert!(category_counts(&Table::default(), CategoryField::ServiceType).is_empty());
    }

    #[test]
    fn test_service_type_options() {
        let table = Table::new(vec![
            Record::new("a", "Dining"),
            Record::new("b", "Buffet"),
            Record::new("c", "Dining"),
        ]);
        assert_eq!(service_type_options(&table), vec!["All", "Buffet", "Dining"]);
    }
}

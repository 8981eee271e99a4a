use crate::core::{CategoryField, NumericField, Table};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
    /// Rows that contributed a value
    pub count: usize,
}

/// Mean of the present values of a numeric column, `None` when there are
/// none.
pub fn mean(table: &Table, field: NumericField) -> Option<f64> {
    let (sum, count) = table
        .values(field)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean of `of` partitioned by `by` (pure).
///
/// Groups are ordered by key. Rows missing either the group value or the
/// measured value are skipped, so every emitted group has at least one
/// contributing row and a finite mean.
///
/// # Arguments
///
/// * `table` - Filtered table
/// * `by` - Category column to partition on
/// * `of` - Numeric column to average
pub fn group_means(table: &Table, by: CategoryField, of: NumericField) -> Vec<GroupMean> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for record in table {
        if let (Some(group), Some(value)) = (record.category(by), record.numeric(of)) {
            let entry = groups.entry(group).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(group, (sum, count))| GroupMean {
            group: group.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Record, YesNo};

    fn table() -> Table {
        Table::new(vec![
            Record::new("a", "Cafe")
                .with_rating(4.0)
                .with_cost(300.0)
                .with_flags(YesNo::Yes, YesNo::No),
            Record::new("b", "Buffet")
                .with_rating(3.0)
                .with_cost(900.0)
                .with_flags(YesNo::No, YesNo::Yes),
            Record::new("c", "Cafe")
                .with_rating(4.5)
                .with_cost(500.0)
                .with_flags(YesNo::Yes, YesNo::No),
            Record::new("d", "Cafe").with_flags(YesNo::No, YesNo::No),
        ])
    }

    #[test]
    fn test_rating_by_online_order() {
        let means = group_means(&table(), CategoryField::OnlineOrder, NumericField::Rating);
        assert_eq!(
            means,
            vec![
                GroupMean {
                    group: "No".into(),
                    mean: 3.0,
                    count: 1
                },
                GroupMean {
                    group: "Yes".into(),
                    mean: 4.25,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_cost_by_service_type() {
        let means = group_means(&table(), CategoryField::ServiceType, NumericField::CostForTwo);
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].group, "Buffet");
        assert_eq!(means[1].group, "Cafe");
        assert_eq!(means[1].mean, 400.0);
        assert!(means.iter().all(|m| m.mean.is_finite()));
    }

    #[test]
    fn test_empty_partitions_omitted() {
        let means = group_means(&Table::default(), CategoryField::BookTable, NumericField::Rating);
        assert!(means.is_empty());
    }

    #[test]
    fn test_overall_mean() {
        let overall = mean(&table(), NumericField::Rating).unwrap();
        assert!((overall - 11.5 / 3.0).abs() < 1e-12);
        assert_eq!(mean(&Table::default(), NumericField::Rating), None);
    }
}

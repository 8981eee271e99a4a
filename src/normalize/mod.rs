//! Normalizer: raw string rows in, typed [`Table`] out.
//!
//! Runs once per input file. The essential numeric fields (rating, cost for
//! two, votes) are either parsed or the row is handled by the configured
//! [`RowPolicy`]; nothing downstream ever sees raw text.

pub mod columns;
pub mod parsers;
pub mod report;

pub use columns::{resolve_columns, Column, ColumnMap};
pub use parsers::{parse_cost, parse_flag, parse_rating, parse_votes, FlagValue};
pub use report::{DataQualityReport, FieldFailures, UnrecognizedValue};

use crate::config::{NormalizeConfig, RowPolicy};
use crate::core::{Record, Table, YesNo};
use crate::ingest::RawTable;

/// Normalized table plus what happened to the input on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub table: Table,
    pub report: DataQualityReport,
}

/// Convert raw rows into the typed table.
///
/// Pure: the same raw table and config always produce the same result.
///
/// # Arguments
///
/// * `raw` - Header and string rows from ingestion
/// * `config` - Row policy, fallback category and extra header aliases
///
/// # Returns
///
/// The normalized table (source order preserved) and a data-quality report
pub fn normalize(raw: &RawTable, config: &NormalizeConfig) -> Normalized {
    let map = resolve_columns(&raw.headers, &config.aliases);
    let extra_columns: Vec<String> = map
        .extra_positions()
        .iter()
        .filter_map(|&i| raw.headers.get(i).cloned())
        .collect();

    let mut report = DataQualityReport {
        policy: config.policy,
        rows_read: raw.rows.len(),
        column_mapping: map.describe(&raw.headers),
        missing_columns: map
            .missing()
            .iter()
            .map(|c| c.canonical_name().to_string())
            .collect(),
        extra_columns: extra_columns.clone(),
        ..Default::default()
    };

    if !report.missing_columns.is_empty() {
        log::warn!(
            "Columns not found under any alias: {}",
            report.missing_columns.join(", ")
        );
    }

    let records: Vec<Record> = raw
        .rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| normalize_row(row, index + 1, &map, config, &mut report))
        .collect();

    report.rows_kept = records.len();
    report.rows_dropped = report.rows_read - report.rows_kept;

    log::info!(
        "Normalized {} of {} rows ({} dropped, policy {})",
        report.rows_kept,
        report.rows_read,
        report.rows_dropped,
        config.policy.as_str()
    );

    Normalized {
        table: Table::with_extra_columns(extra_columns, records)
            .with_absent_columns(report.missing_columns.clone()),
        report,
    }
}

fn cell<'a>(row: &'a [String], map: &ColumnMap, column: Column) -> Option<&'a str> {
    map.position(column)
        .and_then(|i| row.get(i))
        .map(String::as_str)
}

fn normalize_row(
    row: &[String],
    row_number: usize,
    map: &ColumnMap,
    config: &NormalizeConfig,
    report: &mut DataQualityReport,
) -> Option<Record> {
    let rating_cell = cell(row, map, Column::Rate);
    let votes_cell = cell(row, map, Column::Votes);
    let cost_cell = cell(row, map, Column::CostForTwo);

    let rating = rating_cell.and_then(parse_rating);
    let votes = votes_cell.and_then(parse_votes);
    let cost_for_two = cost_cell.and_then(parse_cost);

    // A missing column is not a per-row failure; only present-but-bad cells are.
    let rating_failed = rating_cell.is_some() && rating.is_none();
    let votes_failed = votes_cell.is_some() && votes.is_none();
    let cost_failed = cost_cell.is_some() && cost_for_two.is_none();

    report.failures.rating += usize::from(rating_failed);
    report.failures.votes += usize::from(votes_failed);
    report.failures.cost_for_two += usize::from(cost_failed);

    let votes = match config.policy {
        RowPolicy::Strict if rating_failed || votes_failed || cost_failed => {
            log::debug!("Dropping row {}: unparsable essential field", row_number);
            return None;
        }
        RowPolicy::Lenient if votes_failed => {
            report.votes_defaulted += 1;
            Some(0)
        }
        _ => votes,
    };

    let service_type = cell(row, map, Column::RestaurantType)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(config.fallback_category.as_str())
        .to_string();

    Some(Record {
        name: cell(row, map, Column::Name).unwrap_or_default().to_string(),
        rating,
        votes,
        cost_for_two,
        service_type,
        online_order: read_flag(row, row_number, map, Column::OnlineOrder, report),
        book_table: read_flag(row, row_number, map, Column::BookTable, report),
        extras: map
            .extra_positions()
            .iter()
            .map(|&i| row.get(i).cloned().unwrap_or_default())
            .collect(),
    })
}

fn read_flag(
    row: &[String],
    row_number: usize,
    map: &ColumnMap,
    column: Column,
    report: &mut DataQualityReport,
) -> Option<YesNo> {
    match parse_flag(cell(row, map, column)?) {
        FlagValue::Value(value) => Some(value),
        FlagValue::Missing => None,
        FlagValue::Unrecognized(value) => {
            log::warn!(
                "Row {}: unrecognized {} value '{}' left unset",
                row_number,
                column.canonical_name(),
                value
            );
            report.unrecognized_flags.push(UnrecognizedValue {
                row: row_number,
                column: column.canonical_name(),
                value,
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::RawTable;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    const HEADERS: [&str; 7] = [
        "name",
        "online_order",
        "book_table",
        "rate",
        "votes",
        "approx_cost(for two people)",
        "listed_in(type)",
    ];

    #[test]
    fn test_strict_drops_rows_with_bad_essentials() {
        let input = raw(
            &HEADERS,
            &[
                &["Jalsa", "Yes", "Yes", "4.1/5", "775", "800", "Buffet"],
                &["New Place", "No", "No", "NEW", "0", "300", "Cafe"],
                &["Dash", "No", "No", "-", "0", "300", "Cafe"],
                &["Bad Votes", "No", "No", "3.2/5", "lots", "300", "Cafe"],
                &["Bad Cost", "No", "No", "3.2/5", "5", "n/a", "Cafe"],
            ],
        );

        let result = normalize(&input, &NormalizeConfig::default());
        assert_eq!(result.table.len(), 1);
        let jalsa = &result.table.records()[0];
        assert_eq!(jalsa.rating, Some(4.1));
        assert_eq!(jalsa.cost_for_two, Some(800.0));
        assert_eq!(jalsa.votes, Some(775));
        assert_eq!(jalsa.online_order, Some(YesNo::Yes));

        assert_eq!(result.report.rows_read, 5);
        assert_eq!(result.report.rows_dropped, 4);
        assert_eq!(result.report.failures.rating, 2);
        assert_eq!(result.report.failures.votes, 1);
        assert_eq!(result.report.failures.cost_for_two, 1);
    }

    #[test]
    fn test_lenient_keeps_rows_and_defaults_votes() {
        let input = raw(
            &HEADERS,
            &[
                &["New Place", "No", "No", "NEW", "lots", "300", "Cafe"],
                &["Bad Cost", "No", "No", "3.2/5", "5", "n/a", "Cafe"],
            ],
        );

        let config = NormalizeConfig::default().with_policy(RowPolicy::Lenient);
        let result = normalize(&input, &config);

        assert_eq!(result.table.len(), 2);
        let first = &result.table.records()[0];
        assert_eq!(first.rating, None);
        assert_eq!(first.votes, Some(0));
        assert_eq!(first.cost_for_two, Some(300.0));
        assert_eq!(result.table.records()[1].cost_for_two, None);
        assert_eq!(result.report.votes_defaulted, 1);
        assert_eq!(result.report.rows_dropped, 0);
    }

    #[test]
    fn test_missing_type_uses_fallback_category() {
        let input = raw(&HEADERS, &[&["X", "Yes", "No", "4.0/5", "1", "100", "  "]]);
        let result = normalize(&input, &NormalizeConfig::default());
        assert_eq!(result.table.records()[0].service_type, "Unknown");
    }

    #[test]
    fn test_missing_cost_column_leaves_field_absent() {
        let input = raw(
            &["name", "rate", "votes", "listed_in(type)"],
            &[&["X", "4.0/5", "10", "Cafe"]],
        );
        let result = normalize(&input, &NormalizeConfig::default());

        assert_eq!(result.table.len(), 1);
        assert_eq!(result.table.records()[0].cost_for_two, None);
        assert!(result
            .report
            .missing_columns
            .contains(&"cost_for_two".to_string()));
    }

    #[test]
    fn test_unrecognized_flag_is_reported_not_coerced() {
        let input = raw(&HEADERS, &[&["X", "Maybe", "no", "4.0/5", "1", "100", "Cafe"]]);
        let result = normalize(&input, &NormalizeConfig::default());

        let record = &result.table.records()[0];
        assert_eq!(record.online_order, None);
        assert_eq!(record.book_table, Some(YesNo::No));
        assert_eq!(
            result.report.unrecognized_flags,
            vec![UnrecognizedValue {
                row: 1,
                column: "online_order",
                value: "Maybe".to_string(),
            }]
        );
    }

    #[test]
    fn test_extra_columns_pass_through() {
        let input = raw(
            &["url", "name", "rate", "votes", "cost", "type", "phone"],
            &[&["http://x", "X", "4.0/5", "1", "100", "Cafe", "555"]],
        );
        let result = normalize(&input, &NormalizeConfig::default());

        assert_eq!(
            result.table.extra_columns(),
            &["url".to_string(), "phone".to_string()]
        );
        assert_eq!(result.table.records()[0].extras, vec!["http://x", "555"]);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let input = raw(
            &HEADERS,
            &[
                &["A", "Yes", "No", "3.1/5", "5", "1,100", "Dining"],
                &["B", "1", "0", "4.5/5", "50", "400", "Cafe"],
            ],
        );
        let config = NormalizeConfig::default();
        assert_eq!(normalize(&input, &config), normalize(&input, &config));
    }
}

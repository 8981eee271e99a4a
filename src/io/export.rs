//! Delimited-text export of a (filtered) table.
//!
//! The header is the canonical column set followed by the pass-through
//! columns. Canonical columns the source file never had are left out, so
//! re-normalizing does not mistake them for empty cells. Numbers use Rust's
//! shortest round-trip formatting with `.` as the decimal separator,
//! independent of locale; absent values are empty cells. Re-normalizing the
//! output reproduces the table.

use crate::core::errors::Result;
use crate::core::{Record, Table, YesNo};
use std::io::Write;

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_flag(value: Option<YesNo>) -> String {
    value.map(|v| v.as_str().to_string()).unwrap_or_default()
}

fn canonical_field(record: &Record, column: &str) -> String {
    match column {
        "name" => record.name.clone(),
        "rate" => format_number(record.rating),
        "votes" => record.votes.map(|v| v.to_string()).unwrap_or_default(),
        "cost_for_two" => format_number(record.cost_for_two),
        "restaurant_type" => record.service_type.clone(),
        "online_order" => format_flag(record.online_order),
        "book_table" => format_flag(record.book_table),
        _ => String::new(),
    }
}

fn record_fields(table: &Table, record: &Record) -> Vec<String> {
    table
        .present_columns()
        .map(|column| canonical_field(record, column))
        .chain(record.extras.iter().cloned())
        .collect()
}

/// Write `table` as CSV to `writer`.
///
/// # Errors
///
/// Fails when the underlying writer fails.
pub fn write_delimited<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);

    let header: Vec<&str> = table
        .present_columns()
        .map(|c| -> &str { c })
        .chain(table.extra_columns().iter().map(String::as_str))
        .collect();
    csv_writer.write_record(&header)?;

    for record in table {
        csv_writer.write_record(record_fields(table, record))?;
    }

    csv_writer.flush()?;
    log::debug!("Exported {} rows", table.len());
    Ok(())
}

/// Serialize `table` to CSV bytes, ready for download.
pub fn to_delimited_text(table: &Table) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_delimited(table, &mut buffer)?;
    Ok(buffer)
}

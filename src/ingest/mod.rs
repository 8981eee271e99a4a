//! Raw record ingestion.
//!
//! Turns delimited bytes into a [`RawTable`] of untyped string cells. No
//! interpretation happens here beyond splitting rows and fields; everything
//! else belongs to the normalizer.

use crate::core::errors::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Header plus string rows, exactly as read.
///
/// Every row has one cell per header column: short rows are padded with
/// empty cells and surplus cells are discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a raw table from a header and rows, aligning row widths.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows.into_iter().map(|row| align_row(row, width)).collect();
        Self { headers, rows }
    }

    /// Build a raw table from key/value rows.
    ///
    /// Columns appear in first-seen key order; keys missing from a row become
    /// empty cells.
    pub fn from_pairs<K, V, R, I>(rows: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        R: IntoIterator<Item = (K, V)>,
        I: IntoIterator<Item = R>,
    {
        let mut headers: Vec<String> = Vec::new();
        let mut keyed_rows: Vec<Vec<(usize, String)>> = Vec::new();

        for row in rows {
            let mut cells = Vec::new();
            for (key, value) in row {
                let key = key.as_ref();
                let index = match headers.iter().position(|h| h == key) {
                    Some(index) => index,
                    None => {
                        headers.push(key.to_string());
                        headers.len() - 1
                    }
                };
                cells.push((index, value.into()));
            }
            keyed_rows.push(cells);
        }

        let width = headers.len();
        let rows = keyed_rows
            .into_iter()
            .map(|cells| {
                let mut row = vec![String::new(); width];
                for (index, value) in cells {
                    row[index] = value;
                }
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn align_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

/// Parse comma-separated text with a header row.
///
/// # Arguments
///
/// * `reader` - Source of the delimited bytes
/// * `source_name` - Name used in error messages (usually the file path)
///
/// # Errors
///
/// Returns [`Error::MissingHeader`] when the input has no header row and
/// [`Error::Csv`] when a row cannot be decoded.
pub fn read_csv<R: Read>(reader: R, source_name: &str) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::missing_header(source_name));
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.len() > width {
            log::debug!(
                "Row {} of {} has {} fields, expected {}; surplus ignored",
                rows.len() + 1,
                source_name,
                record.len(),
                width
            );
        }
        let row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        rows.push(align_row(row, width));
    }

    log::info!(
        "Read {} rows with {} columns from {}",
        rows.len(),
        width,
        source_name
    );

    Ok(RawTable { headers, rows })
}

/// Parse an in-memory CSV buffer.
pub fn parse_bytes(bytes: &[u8], source_name: &str) -> Result<RawTable> {
    read_csv(bytes, source_name)
}

/// Read and parse a CSV file from disk.
///
/// # Errors
///
/// Unreadable files surface as [`Error::FileSystem`]; structural problems
/// as in [`read_csv`].
pub fn load_file(path: &Path) -> Result<RawTable> {
    let bytes = crate::io::read_bytes(path)?;
    parse_bytes(&bytes, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_read_csv_basic() {
        let input = indoc! {"
            name,rate,votes
            Jalsa,4.1/5,775
            Spice Elephant,4.1/5,787
        "};

        let raw = read_csv(input.as_bytes(), "inline").unwrap();
        assert_eq!(raw.headers, vec!["name", "rate", "votes"]);
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.rows[1], vec!["Spice Elephant", "4.1/5", "787"]);
    }

    #[test]
    fn test_read_csv_quoted_thousands_separator() {
        let input = "name,approx_cost(for two people)\n\"Big Place\",\"1,200\"\n";
        let raw = read_csv(input.as_bytes(), "inline").unwrap();
        assert_eq!(raw.rows[0][1], "1,200");
    }

    #[test]
    fn test_read_csv_pads_short_rows_and_truncates_long_rows() {
        let input = "a,b,c\n1\n1,2,3,4\n";
        let raw = read_csv(input.as_bytes(), "inline").unwrap();
        assert_eq!(raw.rows[0], vec!["1", "", ""]);
        assert_eq!(raw.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_read_csv_strips_bom() {
        let input = "\u{feff}name,votes\nx,1\n";
        let raw = read_csv(input.as_bytes(), "inline").unwrap();
        assert_eq!(raw.headers[0], "name");
    }

    #[test]
    fn test_empty_input_is_missing_header() {
        let err = read_csv("".as_bytes(), "empty.csv").unwrap_err();
        assert!(matches!(err, Error::MissingHeader { .. }));
    }

    #[test]
    fn test_header_only_input_has_no_rows() {
        let raw = read_csv("name,rate\n".as_bytes(), "inline").unwrap();
        assert!(raw.is_empty());
        assert_eq!(raw.headers.len(), 2);
    }

    #[test]
    fn test_from_pairs_unions_keys() {
        let raw = RawTable::from_pairs(vec![
            vec![("rate", "4.1/5"), ("votes", "120")],
            vec![("votes", "10"), ("type", "Cafe")],
        ]);
        assert_eq!(raw.headers, vec!["rate", "votes", "type"]);
        assert_eq!(raw.rows[0], vec!["4.1/5", "120", ""]);
        assert_eq!(raw.rows[1], vec!["", "10", "Cafe"]);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }
}

//! Cell-level parsers for the inconsistently formatted source columns.
//!
//! Each parser is total: bad input yields `None` (or
//! [`FlagValue::Unrecognized`]) and never an error or panic.

use crate::core::YesNo;

/// Literal rating cells meaning "no rating available". Case-sensitive.
pub const RATING_SENTINELS: [&str; 6] = ["", "NEW", "-", "nan", "None", "NONE"];

pub const MAX_RATING: f64 = 5.0;

/// Parse a rating such as `"4.1/5"`, `"3.9 /5"` or `"4"`.
///
/// Sentinels, unparsable text, non-finite values and values outside
/// [0.0, 5.0] all yield `None`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let without_scale = trimmed
        .strip_suffix("/5")
        .map(str::trim_end)
        .unwrap_or(trimmed);

    if RATING_SENTINELS.contains(&without_scale) {
        return None;
    }

    without_scale
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (0.0..=MAX_RATING).contains(v))
}

/// Parse a cost such as `"800"`, `"1,200"` or `"350 approx"`.
///
/// Grouping commas are removed, then only the leading run of ASCII digits
/// is kept. No leading digit run yields `None`.
pub fn parse_cost(raw: &str) -> Option<f64> {
    let without_separators: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let digits: String = without_separators
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a vote count. Integral floats such as `"12.0"` are accepted.
pub fn parse_votes(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Ok(votes) = trimmed.parse::<u64>() {
        return Some(votes);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
        .map(|v| v as u64)
}

/// Outcome of reading a Yes/No cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Value(YesNo),
    /// Empty cell
    Missing,
    /// Non-empty text outside the alias table, kept verbatim (trimmed)
    Unrecognized(String),
}

/// Normalize a Yes/No cell through the fixed alias table.
pub fn parse_flag(raw: &str) -> FlagValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FlagValue::Missing;
    }

    match trimmed.to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => FlagValue::Value(YesNo::Yes),
        "no" | "n" | "false" | "0" => FlagValue::Value(YesNo::No),
        _ => FlagValue::Unrecognized(trimmed.to_string()),
    }
}

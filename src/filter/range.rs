use crate::core::{NumericField, Table};
use serde::{Deserialize, Serialize};

/// Observed minimum and maximum of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Bounds of the present values of `field`, or `None` when the table has
    /// no values for it.
    pub fn observe(table: &Table, field: NumericField) -> Option<Bounds> {
        table.values(field).fold(None, |acc, v| match acc {
            None => Some(Bounds { min: v, max: v }),
            Some(b) => Some(Bounds {
                min: b.min.min(v),
                max: b.max.max(v),
            }),
        })
    }
}

/// Inclusive numeric range; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Build from optional CLI-style bounds; `None` when both are open.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// Inclusive on both ends. Absent values never pass.
    pub fn contains(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| {
            self.min.is_none_or(|min| v >= min) && self.max.is_none_or(|max| v <= max)
        })
    }

    /// Whether the range spans all of `observed`, making it no constraint at
    /// all. A column without observed values is covered vacuously.
    pub fn covers(&self, observed: Option<Bounds>) -> bool {
        observed.is_none_or(|b| {
            self.min.is_none_or(|min| min <= b.min) && self.max.is_none_or(|max| max >= b.max)
        })
    }
}

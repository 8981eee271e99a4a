//! Pearson correlation across rating, votes and cost for two.

use crate::core::{NumericField, Table};
use serde::{Serialize, Serializer};

/// A correlation coefficient, or an explicit marker that it cannot be
/// computed (fewer than two paired observations or a constant column).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correlation {
    Defined(f64),
    Undefined,
}

impl Correlation {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

impl Serialize for Correlation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Defined(v) => serializer.serialize_f64(*v),
            Self::Undefined => serializer.serialize_str("undefined"),
        }
    }
}

/// Symmetric 3×3 matrix over [`NumericField::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub fields: [NumericField; 3],
    pub cells: [[Correlation; 3]; 3],
}

impl CorrelationMatrix {
    pub fn get(&self, a: NumericField, b: NumericField) -> Correlation {
        let i = field_index(a);
        let j = field_index(b);
        self.cells[i][j]
    }
}

fn field_index(field: NumericField) -> usize {
    match field {
        NumericField::Rating => 0,
        NumericField::Votes => 1,
        NumericField::CostForTwo => 2,
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Pearson coefficient of paired observations.
pub fn pearson(pairs: &[(f64, f64)]) -> Correlation {
    if pairs.len() < 2 {
        return Correlation::Undefined;
    }

    let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    // Exact equality check; a computed variance can be a tiny non-zero
    // number for constant input.
    if is_constant(&xs) || is_constant(&ys) {
        return Correlation::Undefined;
    }

    let n = pairs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Correlation::Undefined;
    }
    Correlation::Defined((cov / denominator).clamp(-1.0, 1.0))
}

fn paired(table: &Table, a: NumericField, b: NumericField) -> Vec<(f64, f64)> {
    table
        .iter()
        .filter_map(|r| Some((r.numeric(a)?, r.numeric(b)?)))
        .collect()
}

/// Correlation matrix over rating, votes and cost (pure).
///
/// Each cell uses the rows where both columns are present. The diagonal is
/// 1.0 wherever the column's variance is defined and undefined otherwise;
/// off-diagonal cells are computed once and mirrored, so the matrix is
/// exactly symmetric.
pub fn correlation_matrix(table: &Table) -> CorrelationMatrix {
    let fields = NumericField::ALL;
    let mut cells = [[Correlation::Undefined; 3]; 3];

    for (i, &field) in fields.iter().enumerate() {
        let values: Vec<f64> = table.values(field).collect();
        if values.len() >= 2 && !is_constant(&values) {
            cells[i][i] = Correlation::Defined(1.0);
        }

        for (j, &other) in fields.iter().enumerate().skip(i + 1) {
            let r = pearson(&paired(table, field, other));
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }

    CorrelationMatrix { fields, cells }
}

//! Headline figures, histogram and trendline for the dashboard.

use super::means::mean;
use crate::core::{NumericField, Table};
use crate::filter::Bounds;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_restaurants: usize,
    pub mean_rating: Option<f64>,
    pub mean_cost_for_two: Option<f64>,
}

/// Row count plus mean rating and mean cost; means are `None` when there
/// is nothing to average.
pub fn kpi_summary(table: &Table) -> KpiSummary {
    KpiSummary {
        total_restaurants: table.len(),
        mean_rating: mean(table, NumericField::Rating),
        mean_cost_for_two: mean(table, NumericField::CostForTwo),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub field: NumericField,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Equal-width histogram over the observed range of `field`.
///
/// Each bin is `[lower, upper)` except the last, which also holds the
/// maximum. A constant column produces a single bin; a column without
/// values produces none.
pub fn histogram(table: &Table, field: NumericField, bins: usize) -> Histogram {
    let Some(bounds) = Bounds::observe(table, field) else {
        return Histogram {
            field,
            bins: Vec::new(),
        };
    };

    let bin_count = if bounds.min == bounds.max { 1 } else { bins.max(1) };
    let width = (bounds.max - bounds.min) / bin_count as f64;

    let mut out: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: bounds.min + width * i as f64,
            upper: if i + 1 == bin_count {
                bounds.max
            } else {
                bounds.min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in table.values(field) {
        let index = if width > 0.0 {
            (((value - bounds.min) / width) as usize).min(bin_count - 1)
        } else {
            0
        };
        out[index].count += 1;
    }

    Histogram { field, bins: out }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
    pub points: usize,
}

impl LinearTrend {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Least-squares line of `y` against `x` over rows with both values.
///
/// `None` with fewer than two points or when `x` is constant.
pub fn trendline(table: &Table, x: NumericField, y: NumericField) -> Option<LinearTrend> {
    let points: Vec<(f64, f64)> = table
        .iter()
        .filter_map(|r| Some((r.numeric(x)?, r.numeric(y)?)))
        .collect();

    if points.len() < 2 || points.windows(2).all(|w| w[0].0 == w[1].0) {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (px, py)| {
        let dx = px - mean_x;
        (sxy + dx * (py - mean_y), sxx + dx * dx)
    });
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(LinearTrend {
        slope,
        intercept: mean_y - slope * mean_x,
        points: points.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Record;

    fn rated(rating: f64) -> Record {
        Record::new("r", "Cafe").with_rating(rating)
    }

    #[test]
    fn test_kpi_summary() {
        let table = Table::new(vec![
            rated(4.0).with_cost(200.0),
            rated(3.0).with_cost(600.0),
        ]);
        let kpi = kpi_summary(&table);
        assert_eq!(kpi.total_restaurants, 2);
        assert_eq!(kpi.mean_rating, Some(3.5));
        assert_eq!(kpi.mean_cost_for_two, Some(400.0));
    }

    #[test]
    fn test_kpi_summary_empty() {
        let kpi = kpi_summary(&Table::default());
        assert_eq!(kpi.total_restaurants, 0);
        assert_eq!(kpi.mean_rating, None);
        assert_eq!(kpi.mean_cost_for_two, None);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let table = Table::new(vec![rated(2.0), rated(3.0), rated(3.5), rated(4.0)]);
        let hist = histogram(&table, NumericField::Rating, 4);

        assert_eq!(hist.bins.len(), 4);
        assert_eq!(hist.total(), 4);
        assert_eq!(hist.bins[0].lower, 2.0);
        assert_eq!(hist.bins[3].upper, 4.0);
        // maximum lands in the last bin
        assert_eq!(hist.bins[3].count, 2);
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        let constant = Table::new(vec![rated(3.7), rated(3.7)]);
        let hist = histogram(&constant, NumericField::Rating, 20);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].count, 2);

        assert!(histogram(&Table::default(), NumericField::Rating, 20).bins.is_empty());
    }

    #[test]
    fn test_trendline_exact_fit() {
        let table = Table::new(vec![
            rated(3.0).with_cost(100.0),
            rated(3.5).with_cost(200.0),
            rated(4.0).with_cost(300.0),
        ]);
        let trend = trendline(&table, NumericField::CostForTwo, NumericField::Rating).unwrap();
        assert!((trend.slope - 0.005).abs() < 1e-12);
        assert!((trend.predict(400.0) - 4.5).abs() < 1e-9);
        assert_eq!(trend.points, 3);
    }

    #[test]
    fn test_trendline_undefined() {
        let one = Table::new(vec![rated(3.0).with_cost(100.0)]);
        assert!(trendline(&one, NumericField::CostForTwo, NumericField::Rating).is_none());

        let flat_x = Table::new(vec![rated(3.0).with_cost(100.0), rated(4.0).with_cost(100.0)]);
        assert!(trendline(&flat_x, NumericField::CostForTwo, NumericField::Rating).is_none());
    }
}

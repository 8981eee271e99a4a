//! The full set of views the dashboard shows for one filter selection.

use super::stage::PureStage;
use crate::aggregate::{
    bottom_by_votes, category_counts, correlation_matrix, feature_combination, group_means,
    histogram, kpi_summary, service_type_options, top_by_votes, trendline, CategoryCount,
    CorrelationMatrix, FeatureCombination, GroupMean, Histogram, KpiSummary, LinearTrend,
};
use crate::config::AggregateConfig;
use crate::core::{CategoryField, NumericField, Table};
use crate::filter::{self, Bounds, FilterSpec};
use serde::Serialize;

/// Sizes of the derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub top_k: usize,
    pub histogram_bins: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from(&AggregateConfig::default())
    }
}

impl From<&AggregateConfig> for ViewOptions {
    fn from(config: &AggregateConfig) -> Self {
        Self {
            top_k: config.top_k,
            histogram_bins: config.histogram_bins,
        }
    }
}

/// Choices offered to the user, derived from the unfiltered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterControls {
    /// `"All"` followed by every restaurant type
    pub service_types: Vec<String>,
    pub rating_bounds: Option<Bounds>,
    pub cost_bounds: Option<Bounds>,
}

impl FilterControls {
    pub fn from_table(base: &Table) -> Self {
        Self {
            service_types: service_type_options(base),
            rating_bounds: Bounds::observe(base, NumericField::Rating),
            cost_bounds: Bounds::observe(base, NumericField::CostForTwo),
        }
    }
}

/// Every aggregate view for one filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filter: FilterSpec,
    pub controls: FilterControls,
    pub kpis: KpiSummary,
    pub type_distribution: Vec<CategoryCount>,
    pub rating_histogram: Histogram,
    pub rating_by_online_order: Vec<GroupMean>,
    pub rating_by_book_table: Vec<GroupMean>,
    pub cost_by_type: Vec<GroupMean>,
    pub correlation: CorrelationMatrix,
    pub cost_rating_trend: Option<LinearTrend>,
    pub most_voted: Table,
    pub least_voted: Table,
    pub feature_combination: FeatureCombination,
}

/// Compute every view for an already-filtered table (pure).
pub fn aggregate_views(
    filtered: &Table,
    spec: &FilterSpec,
    controls: FilterControls,
    options: ViewOptions,
) -> DashboardView {
    DashboardView {
        filter: spec.clone(),
        controls,
        kpis: kpi_summary(filtered),
        type_distribution: category_counts(filtered, CategoryField::ServiceType),
        rating_histogram: histogram(filtered, NumericField::Rating, options.histogram_bins),
        rating_by_online_order: group_means(
            filtered,
            CategoryField::OnlineOrder,
            NumericField::Rating,
        ),
        rating_by_book_table: group_means(filtered, CategoryField::BookTable, NumericField::Rating),
        cost_by_type: group_means(filtered, CategoryField::ServiceType, NumericField::CostForTwo),
        correlation: correlation_matrix(filtered),
        cost_rating_trend: trendline(filtered, NumericField::CostForTwo, NumericField::Rating),
        most_voted: top_by_votes(filtered, options.top_k),
        least_voted: bottom_by_votes(filtered, options.top_k),
        feature_combination: feature_combination(filtered),
    }
}

/// Filter the base table and derive every view from the result.
///
/// This is the whole per-interaction run: the base table is the memoized
/// normalizer output, so only filtering and aggregation happen here.
pub fn build_dashboard(base: &Table, spec: &FilterSpec, options: ViewOptions) -> DashboardView {
    let filter_stage = PureStage::new("Filter", |table: &Table| filter::apply(table, spec));
    let aggregate_stage = PureStage::new("Aggregate", |filtered: Table| {
        aggregate_views(&filtered, spec, FilterControls::from_table(base), options)
    });

    aggregate_stage.run(filter_stage.run(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Record, YesNo};
    use crate::filter::NumericRange;

    fn base() -> Table {
        Table::new(vec![
            Record::new("Jalsa", "Buffet")
                .with_rating(4.1)
                .with_votes(775)
                .with_cost(800.0)
                .with_flags(YesNo::Yes, YesNo::Yes),
            Record::new("Cafe Down", "Cafe")
                .with_rating(3.2)
                .with_votes(12)
                .with_cost(300.0)
                .with_flags(YesNo::No, YesNo::No),
            Record::new("Cafe Up", "Cafe")
                .with_rating(4.6)
                .with_votes(400)
                .with_cost(500.0)
                .with_flags(YesNo::Yes, YesNo::No),
        ])
    }

    #[test]
    fn test_build_dashboard_unfiltered() {
        let view = build_dashboard(&base(), &FilterSpec::new(), ViewOptions::default());

        assert_eq!(view.kpis.total_restaurants, 3);
        assert_eq!(view.type_distribution[0].value, "Cafe");
        assert_eq!(view.feature_combination.both, 1);
        assert_eq!(view.most_voted.records()[0].name, "Jalsa");
        assert_eq!(view.least_voted.records()[0].name, "Cafe Down");
        assert_eq!(view.controls.service_types, vec!["All", "Buffet", "Cafe"]);
    }

    #[test]
    fn test_controls_come_from_base_not_filtered_table() {
        let spec = FilterSpec::new().with_service_types(["Cafe"]);
        let view = build_dashboard(&base(), &spec, ViewOptions::default());

        assert_eq!(view.kpis.total_restaurants, 2);
        assert_eq!(
            view.controls.cost_bounds,
            Some(Bounds {
                min: 300.0,
                max: 800.0
            })
        );
    }

    #[test]
    fn test_empty_selection_is_total() {
        let spec = FilterSpec::new().with_rating(NumericRange::between(0.0, 1.0));
        let view = build_dashboard(&base(), &spec, ViewOptions::default());

        assert_eq!(view.kpis.total_restaurants, 0);
        assert_eq!(view.kpis.mean_rating, None);
        assert!(view.type_distribution.is_empty());
        assert!(view.rating_histogram.bins.is_empty());
        assert!(view.most_voted.is_empty());
        assert_eq!(view.feature_combination.total(), 0);
        assert!(view.cost_rating_trend.is_none());
    }

    #[test]
    fn test_view_options_from_config() {
        let options = ViewOptions::from(&AggregateConfig {
            top_k: 3,
            histogram_bins: 5,
        });
        let view = build_dashboard(&base(), &FilterSpec::new(), options);
        assert!(view.rating_histogram.bins.len() <= 5);
    }
}

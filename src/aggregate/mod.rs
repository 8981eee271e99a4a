//! Pure aggregation functions over a (usually filtered) table.
//!
//! Every function here is total: an empty table yields empty collections,
//! `None`, or [`Correlation::Undefined`], never a panic or NaN.

pub mod combination;
pub mod correlation;
pub mod counts;
pub mod distribution;
pub mod means;
pub mod ranking;

pub use combination::{feature_combination, FeatureCombination};
pub use correlation::{correlation_matrix, pearson, Correlation, CorrelationMatrix};
pub use counts::{category_counts, service_type_options, CategoryCount};
pub use distribution::{
    histogram, kpi_summary, trendline, Histogram, HistogramBin, KpiSummary, LinearTrend,
};
pub use means::{group_means, mean, GroupMean};
pub use ranking::{bottom_by_votes, rank_by_votes, top_by_votes, VoteOrder, DEFAULT_K};

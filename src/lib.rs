// Export modules for library usage
pub mod aggregate;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod filter;
pub mod formatting;
pub mod ingest;
pub mod io;
pub mod normalize;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::errors::{Error, Result};
pub use crate::core::{CategoryField, NumericField, Record, Table, YesNo};

pub use crate::ingest::{load_file, parse_bytes, read_csv, RawTable};

pub use crate::normalize::{normalize, DataQualityReport, Normalized};

pub use crate::filter::{apply, CategorySelection, FilterSpec, NumericRange};

pub use crate::aggregate::{
    bottom_by_votes, category_counts, correlation_matrix, feature_combination, group_means,
    histogram, kpi_summary, top_by_votes, trendline, Correlation, CorrelationMatrix,
};

pub use crate::io::export::{to_delimited_text, write_delimited};
pub use crate::io::output::{create_writer, OutputWriter};

pub use crate::pipeline::{build_dashboard, ingest_and_normalize, DashboardView, Session};

pub use crate::config::{load_config, DashConfig, RowPolicy};

use crate::core::YesNo;
use crate::filter::{FilterSpec, NumericRange};
use crate::normalize::{parse_flag, FlagValue};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "restodash")]
#[command(about = "Restaurant listings dashboard: clean, filter and summarize a CSV export", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: Show pipeline progress
    /// -vv: Show per-stage details
    /// -vvv: Show all trace information
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to the nearest .restodash.toml)
    #[arg(long, global = true, env = "RESTODASH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every dashboard view for a listings file
    Summary {
        /// Listings CSV file
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        normalize: NormalizeArgs,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows shown in the most and least voted rankings
        #[arg(long = "top-k")]
        top_k: Option<usize>,

        /// Disable colors and use ASCII table borders
        #[arg(long)]
        plain: bool,
    },

    /// Write the filtered, normalized table as CSV
    Export {
        /// Listings CSV file
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        normalize: NormalizeArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report how the input was cleaned: dropped rows, parse failures, column mapping
    Quality {
        /// Listings CSV file
        file: PathBuf,

        #[command(flatten)]
        normalize: NormalizeArgs,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colors and use ASCII table borders
        #[arg(long)]
        plain: bool,
    },

    /// Initialize a .restodash.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Filter selection shared by the commands that filter.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Restaurant types to keep ("All" keeps every type)
    #[arg(long = "type", value_delimiter = ',')]
    pub service_types: Vec<String>,

    /// Keep only restaurants with (Yes) or without (No) online ordering
    #[arg(long = "online-order")]
    pub online_order: Option<String>,

    /// Keep only restaurants with (Yes) or without (No) table booking
    #[arg(long = "book-table")]
    pub book_table: Option<String>,

    #[arg(long = "min-rating")]
    pub min_rating: Option<f64>,

    #[arg(long = "max-rating")]
    pub max_rating: Option<f64>,

    #[arg(long = "min-cost")]
    pub min_cost: Option<f64>,

    #[arg(long = "max-cost")]
    pub max_cost: Option<f64>,
}

impl FilterArgs {
    /// Convert the flags into a filter selection.
    ///
    /// # Errors
    ///
    /// Yes/No flags outside the accepted aliases and inverted ranges are
    /// rejected with a message naming the flag.
    pub fn to_filter_spec(&self) -> Result<FilterSpec, String> {
        let mut spec = FilterSpec::new().with_service_types(self.service_types.iter());

        if let Some(value) = &self.online_order {
            spec = spec.with_online_order(parse_flag_arg("--online-order", value)?);
        }
        if let Some(value) = &self.book_table {
            spec = spec.with_book_table(parse_flag_arg("--book-table", value)?);
        }

        spec.rating = range_arg("rating", self.min_rating, self.max_rating)?;
        spec.cost_for_two = range_arg("cost", self.min_cost, self.max_cost)?;
        Ok(spec)
    }
}

fn parse_flag_arg(flag: &str, value: &str) -> Result<YesNo, String> {
    match parse_flag(value) {
        FlagValue::Value(v) => Ok(v),
        _ => Err(format!("{flag} expects Yes or No, got '{value}'")),
    }
}

fn range_arg(name: &str, min: Option<f64>, max: Option<f64>) -> Result<Option<NumericRange>, String> {
    for (bound, value) in [("min", min), ("max", max)] {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(format!("--{bound}-{name} must be a finite number"));
        }
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(format!("--min-{name} ({lo}) is greater than --max-{name} ({hi})"));
        }
    }
    Ok(NumericRange::from_bounds(min, max))
}

/// Normalization overrides shared by every command that reads a file.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct NormalizeArgs {
    /// Keep rows with unparseable rating, cost or votes instead of dropping them
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

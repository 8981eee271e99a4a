use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cli::OutputFormat;

/// What to do with a row whose essential numeric fields do not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Drop the row
    #[default]
    Strict,
    /// Keep the row; votes default to 0, rating and cost stay absent
    Lenient,
}

impl RowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

/// Root configuration structure for restodash
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashConfig {
    /// Cleaning rules applied once to the input file
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Defaults for the dashboard views
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    #[serde(default)]
    pub policy: RowPolicy,

    /// Category used when the restaurant type cell is empty
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,

    /// Extra header aliases, keyed by canonical column name
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            policy: RowPolicy::default(),
            fallback_category: default_fallback_category(),
            aliases: BTreeMap::new(),
        }
    }
}

impl NormalizeConfig {
    pub fn with_policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stable description of every setting that changes normalizer output.
    ///
    /// Part of the memoization key for normalized tables.
    pub fn fingerprint(&self) -> String {
        let aliases = self
            .aliases
            .iter()
            .map(|(column, names)| format!("{}={}", column, names.join("|")))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "policy={};fallback={};aliases={}",
            self.policy.as_str(),
            self.fallback_category,
            aliases
        )
    }
}

pub fn default_fallback_category() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Rows shown in the most/least voted rankings
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Number of equal-width bins in the rating histogram
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl AggregateConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.top_k == 0 {
            return Err("aggregate.top_k must be at least 1".to_string());
        }
        if self.histogram_bins == 0 {
            return Err("aggregate.histogram_bins must be at least 1".to_string());
        }
        Ok(())
    }
}

pub fn default_top_k() -> usize {
    10
}

pub fn default_histogram_bins() -> usize {
    20
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
}

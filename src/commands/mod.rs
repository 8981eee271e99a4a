//! CLI command implementations for restodash operations.
//!
//! Available commands:
//! - **summary**: Render every dashboard view for a filtered listings file
//! - **export**: Write the filtered, normalized table as CSV
//! - **quality**: Show the data-quality report of the normalizer
//! - **init**: Initialize a new restodash configuration file

pub mod export;
pub mod init;
pub mod quality;
pub mod summary;

pub use export::{handle_export, ExportConfig};
pub use init::init_config;
pub use quality::{handle_quality, QualityConfig};
pub use summary::{handle_summary, SummaryConfig};

use crate::cli::{NormalizeArgs, OutputFormat};
use crate::config::{load_config_from, DashConfig, RowPolicy};
use crate::formatting::FormattingConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration and apply command-line overrides on top.
pub fn resolve_config(config_path: Option<&Path>, normalize: NormalizeArgs) -> Result<DashConfig> {
    let mut config = load_config_from(config_path).context("Failed to load configuration")?;
    if normalize.lenient {
        config.normalize.policy = RowPolicy::Lenient;
    }
    log::debug!("Row policy: {}", config.normalize.policy.as_str());
    Ok(config)
}

/// Explicit `--format`, else the configured default, else terminal.
pub fn resolve_format(explicit: Option<OutputFormat>, config: &DashConfig) -> OutputFormat {
    explicit
        .or(config.output.default_format)
        .unwrap_or(OutputFormat::Terminal)
}

pub fn resolve_formatting(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

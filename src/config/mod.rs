// Core configuration types
mod core;
mod loader;

pub use self::core::{
    default_fallback_category, default_histogram_bins, default_top_k, AggregateConfig,
    DashConfig, NormalizeConfig, OutputConfig, RowPolicy,
};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

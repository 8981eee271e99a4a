use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{AggregateConfig, DashConfig};
use crate::core::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".restodash.toml";

/// Read the raw contents of a config file
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<DashConfig, String> {
    let mut config = toml::from_str::<DashConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.aggregate.validate() {
        log::warn!("Invalid aggregate settings: {}. Using defaults.", e);
        config.aggregate = AggregateConfig::default();
    }

    if config.normalize.fallback_category.trim().is_empty() {
        log::warn!("Empty normalize.fallback_category. Using \"Unknown\".");
        config.normalize.fallback_category = super::core::default_fallback_category();
    }

    Ok(config)
}

/// Try loading config from a specific path, warning on anything but absence
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<DashConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // "not found" is the normal case while walking ancestors
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the current directory and its ancestors for `.restodash.toml`.
pub fn load_config() -> DashConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return DashConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DashConfig::default()
        })
}

/// Load an explicitly requested config file, or fall back to discovery.
///
/// # Errors
///
/// An explicit path that cannot be read or parsed is an error; discovery
/// never fails.
pub fn load_config_from(path: Option<&Path>) -> Result<DashConfig> {
    match path {
        None => Ok(load_config()),
        Some(path) => {
            let contents = read_config_file(path).map_err(|e| {
                Error::file_system_io("Failed to read config file", path, e)
            })?;
            parse_and_validate_config(&contents).map_err(Error::Configuration)
        }
    }
}

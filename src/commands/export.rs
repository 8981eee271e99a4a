use super::resolve_config;
use crate::cli::{FilterArgs, NormalizeArgs};
use crate::io;
use crate::pipeline::Session;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

pub struct ExportConfig {
    pub file: PathBuf,
    pub filters: FilterArgs,
    pub normalize: NormalizeArgs,
    pub config_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub fn handle_export(config: ExportConfig) -> Result<()> {
    let dash_config = resolve_config(config.config_path.as_deref(), config.normalize)?;
    let spec = config.filters.to_filter_spec().map_err(|e| anyhow!(e))?;

    let mut session = Session::new(dash_config);
    let filtered = session
        .filtered(&config.file, &spec)
        .with_context(|| format!("Failed to load {}", config.file.display()))?;

    let destination = io::destination(config.output.as_deref())?;
    io::write_delimited(&filtered, destination).context("Failed to write export")?;

    if let Some(path) = &config.output {
        log::info!("Exported {} rows to {}", filtered.len(), path.display());
    }
    Ok(())
}

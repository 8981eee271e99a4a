use super::{resolve_config, resolve_format, resolve_formatting};
use crate::cli::{NormalizeArgs, OutputFormat};
use crate::io::{self, create_writer};
use crate::pipeline::Session;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct QualityConfig {
    pub file: PathBuf,
    pub normalize: NormalizeArgs,
    pub config_path: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub plain: bool,
}

pub fn handle_quality(config: QualityConfig) -> Result<()> {
    let dash_config = resolve_config(config.config_path.as_deref(), config.normalize)?;
    let format = resolve_format(config.format, &dash_config);

    let mut session = Session::new(dash_config);
    let normalized = session
        .load(&config.file)
        .with_context(|| format!("Failed to load {}", config.file.display()))?;

    if normalized.report.has_concerns() {
        log::warn!(
            "{} rows dropped, {} Yes/No values unrecognized",
            normalized.report.rows_dropped,
            normalized.report.unrecognized_flags.len()
        );
    }

    let destination = io::destination(config.output.as_deref())?;
    let mut writer = create_writer(format, destination, resolve_formatting(config.plain));
    writer.write_quality(&normalized.report)?;
    Ok(())
}

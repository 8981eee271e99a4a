use super::{resolve_config, resolve_format, resolve_formatting};
use crate::cli::{FilterArgs, NormalizeArgs, OutputFormat};
use crate::io::{self, create_writer};
use crate::pipeline::Session;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

pub struct SummaryConfig {
    pub file: PathBuf,
    pub filters: FilterArgs,
    pub normalize: NormalizeArgs,
    pub config_path: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub top_k: Option<usize>,
    pub plain: bool,
}

pub fn handle_summary(config: SummaryConfig) -> Result<()> {
    let mut dash_config = resolve_config(config.config_path.as_deref(), config.normalize)?;
    if let Some(top_k) = config.top_k {
        if top_k == 0 {
            return Err(anyhow!("--top-k must be at least 1"));
        }
        dash_config.aggregate.top_k = top_k;
    }

    let spec = config.filters.to_filter_spec().map_err(|e| anyhow!(e))?;
    let format = resolve_format(config.format, &dash_config);

    let mut session = Session::new(dash_config);
    let view = session
        .dashboard(&config.file, &spec)
        .with_context(|| format!("Failed to summarize {}", config.file.display()))?;
    log::info!(
        "{} of the listings match the current filters",
        view.kpis.total_restaurants
    );

    let destination = io::destination(config.output.as_deref())?;
    let mut writer = create_writer(format, destination, resolve_formatting(config.plain));
    writer.write_dashboard(&view)?;
    Ok(())
}

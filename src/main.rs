use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use restodash::cli::{Cli, Commands};
use restodash::commands::{
    handle_export, handle_quality, handle_summary, ExportConfig, QualityConfig, SummaryConfig,
};

fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn configure_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(verbosity_level(verbosity));
    // RUST_LOG, when set, takes precedence over -v
    builder.parse_default_env();
    builder.format_timestamp(None);
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.verbosity);

    match cli.command {
        Commands::Summary {
            file,
            filters,
            normalize,
            format,
            output,
            top_k,
            plain,
        } => handle_summary(SummaryConfig {
            file,
            filters,
            normalize,
            config_path: cli.config,
            format,
            output,
            top_k,
            plain,
        }),
        Commands::Export {
            file,
            filters,
            normalize,
            output,
        } => handle_export(ExportConfig {
            file,
            filters,
            normalize,
            config_path: cli.config,
            output,
        }),
        Commands::Quality {
            file,
            normalize,
            format,
            output,
            plain,
        } => handle_quality(QualityConfig {
            file,
            normalize,
            config_path: cli.config,
            format,
            output,
            plain,
        }),
        Commands::Init { force } => restodash::commands::init_config(force),
    }
}

use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# Restodash Configuration

[normalize]
# "strict" drops rows whose rating, cost or votes do not parse;
# "lenient" keeps them (votes default to 0, rating and cost stay empty)
policy = "strict"
fallback_category = "Unknown"

# Extra header names, keyed by canonical column
[normalize.aliases]
# cost_for_two = ["price for two"]
# restaurant_type = ["category"]

[aggregate]
top_k = 10
histogram_bins = 20

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

/// Write the default configuration into `dir`.
pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}

use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use modhub_core::HarvestConfig;

use crate::error::CliError;

/// Print the effective configuration (defaults merged with the file, if any).
pub(crate) fn run_config_show(config_file: Option<PathBuf>) -> Result<(), CliError> {
    let source = config_file.clone().or_else(modhub_core::config_path);
    let config = HarvestConfig::load(config_file.as_deref())?;

    match &source {
        Some(p) if p.exists() => log::info!(
            "# Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "# Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "# Config file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    log::info!("");
    log::info!("{}", config.to_toml_string()?);
    Ok(())
}

/// Print the default config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = modhub_core::config_path()
        .ok_or_else(|| CliError::other("Could not determine config directory"))?;
    log::info!("{}", path.display());
    Ok(())
}

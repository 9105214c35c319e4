use std::fs;
use std::path::{Path, PathBuf};

use modhub_core::HarvestConfig;
use modhub_fetch::{Fetch, search};

use crate::build::{BuildProgress, CatalogBuilder};
use crate::emit::{emit, write_catalog};
use crate::error::CatalogError;
use crate::summary::HarvestSummary;

/// Output locations for a run.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Catalog file, overwritten on success
    pub output: PathBuf,
    /// Icon directory, cleared and recreated every run
    pub icons_dir: PathBuf,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("mods.json"),
            icons_dir: PathBuf::from("icons"),
        }
    }
}

/// Discover, validate and emit the full catalog.
///
/// Fails only when the mandatory first search page fails, or when the icon
/// directory or the catalog file cannot be written.
pub fn run(
    fetch: &dyn Fetch,
    config: &HarvestConfig,
    options: &HarvestOptions,
    progress: &dyn Fn(BuildProgress),
) -> Result<HarvestSummary, CatalogError> {
    let discovery = search::aggregate(fetch, config)?;

    reset_dir(&options.icons_dir)?;

    let build = CatalogBuilder::new(fetch, config, &options.icons_dir)
        .build(&discovery.candidates, progress);
    let summary = HarvestSummary::new(&discovery, &build.stats);

    log::info!("Creating {}...", options.output.display());
    let contents = emit(build.entries)?;
    write_catalog(&options.output, &contents)?;

    Ok(summary)
}

/// Remove `dir` with everything in it and create it empty.
pub fn reset_dir(dir: &Path) -> Result<(), CatalogError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| CatalogError::output(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| CatalogError::output(dir, e))
}

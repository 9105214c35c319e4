use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use modhub_catalog::{BuildProgress, HarvestOptions, HarvestSummary};
use modhub_core::HarvestConfig;
use modhub_fetch::HttpFetcher;

use crate::error::CliError;

/// Run a full harvest and print the summary.
pub(crate) fn run_harvest(
    output: PathBuf,
    icons_dir: PathBuf,
    config_file: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let config = HarvestConfig::load(config_file.as_deref())?;

    let token = HttpFetcher::token_from_env();
    if token.is_none() {
        log::warn!("GITHUB_TOKEN is not set; unauthenticated requests are heavily rate limited");
    }
    let fetcher = HttpFetcher::new(&config, token)?;
    let options = HarvestOptions { output, icons_dir };

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} [{pos}/{len}] {msg}")
                .map_err(|e| CliError::other(e.to_string()))?
                .tick_chars("/-\\|"),
        );
        pb.set_message("Searching...");
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    };

    let progress = |p: BuildProgress| match p {
        BuildProgress::Started { total } => pb.set_length(total as u64),
        BuildProgress::Querying { repo, index, .. } => {
            pb.set_position(index as u64);
            pb.set_message(repo);
        }
        BuildProgress::IconFound { .. } => {}
        BuildProgress::Accepted { .. } | BuildProgress::Skipped { .. } => pb.inc(1),
        BuildProgress::Done { .. } => pb.finish_and_clear(),
    };

    let result = modhub_catalog::run(&fetcher, &config, &options, &progress);
    pb.finish_and_clear();
    let summary = result?;

    print_summary(&summary, &options);
    Ok(())
}

fn print_summary(summary: &HarvestSummary, options: &HarvestOptions) {
    log::info!("");
    log::info!(
        "{}",
        "Harvest complete".if_supports_color(Stdout, |t| t.bold()),
    );
    for line in summary.to_string().lines() {
        log::info!("  {line}");
    }
    log::info!(
        "  Catalog: {}",
        options.output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  Icons:   {}",
        options.icons_dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
}

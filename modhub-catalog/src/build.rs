//! Per-candidate resolution: metadata, icon, compatibility, entry.
//!
//! Candidates are processed one at a time in discovery order. Nothing that
//! goes wrong with a single candidate stops the loop; the candidate is
//! reported as skipped and the next one starts.

use std::fmt;
use std::path::{Path, PathBuf};

use modhub_core::{CatalogEntry, ColorMarkup, HarvestConfig, SearchHit, is_compatible};
use modhub_fetch::{Fetch, IconAsset, resolve_icon, resolve_metadata};

use crate::entry::{declared_min_game_version, make_entry};
use crate::summary::BuildStats;

/// Why a candidate did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No metadata path produced a valid file
    NoMetadata,
    /// Declared minimum game version is below the floor
    Incompatible { min_game_version: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoMetadata => write!(f, "no meta found"),
            SkipReason::Incompatible { min_game_version } => {
                write!(f, "outdated (minGameVersion {min_game_version})")
            }
        }
    }
}

/// Progress information for callbacks.
#[derive(Debug, Clone)]
pub enum BuildProgress {
    /// About to process `total` candidates
    Started { total: usize },
    /// Resolving a candidate
    Querying {
        repo: String,
        index: usize,
        total: usize,
    },
    /// An icon was found and normalized
    IconFound {
        repo: String,
        width: u32,
        height: u32,
    },
    /// Candidate produced a catalog entry
    Accepted { repo: String },
    /// Candidate was dropped
    Skipped { repo: String, reason: SkipReason },
    /// All candidates processed
    Done { accepted: usize },
}

/// What happened to a candidate's icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconOutcome {
    /// Below the star threshold, never fetched
    Gated,
    /// No icon path decoded
    NotFound,
    Written(PathBuf),
    /// Resolved but could not be saved; the entry is kept
    WriteFailed,
}

/// Result of processing one candidate.
#[derive(Debug, Clone)]
pub enum Outcome {
    Accepted {
        entry: CatalogEntry,
        icon: IconOutcome,
    },
    Skipped {
        reason: SkipReason,
        /// `None` when metadata never resolved, so the icon was not looked at
        icon: Option<IconOutcome>,
    },
}

/// Entries produced by a build, in discovery order.
#[derive(Debug, Default)]
pub struct Build {
    pub entries: Vec<CatalogEntry>,
    pub stats: BuildStats,
}

/// Drives metadata and icon resolution for a list of candidates.
pub struct CatalogBuilder<'a> {
    fetch: &'a dyn Fetch,
    config: &'a HarvestConfig,
    icons_dir: &'a Path,
    markup: ColorMarkup,
}

impl<'a> CatalogBuilder<'a> {
    /// Icons are written into `icons_dir`, which must already exist.
    pub fn new(fetch: &'a dyn Fetch, config: &'a HarvestConfig, icons_dir: &'a Path) -> Self {
        Self {
            fetch,
            config,
            icons_dir,
            markup: ColorMarkup::new(&config.color_names),
        }
    }

    pub fn build(&self, candidates: &[SearchHit], progress: &dyn Fn(BuildProgress)) -> Build {
        let total = candidates.len();
        let mut build = Build::default();
        progress(BuildProgress::Started { total });

        for (index, hit) in candidates.iter().enumerate() {
            let repo = hit.full_name.clone();
            log::info!("[{}%] [{}]: querying...", index * 100 / total, repo);
            progress(BuildProgress::Querying {
                repo: repo.clone(),
                index,
                total,
            });

            build.stats.processed += 1;
            match self.process(hit, progress) {
                Outcome::Accepted { entry, icon } => {
                    build.stats.record_icon(&icon);
                    log::info!("  | Found mod meta file!");
                    build.stats.accepted += 1;
                    build.entries.push(entry);
                    progress(BuildProgress::Accepted { repo });
                }
                Outcome::Skipped { reason, icon } => {
                    if let Some(icon) = &icon {
                        build.stats.record_icon(icon);
                    }
                    match reason {
                        SkipReason::NoMetadata => build.stats.missing_metadata += 1,
                        SkipReason::Incompatible { .. } => build.stats.incompatible += 1,
                    }
                    log::info!("  | Skipping, {reason}.");
                    progress(BuildProgress::Skipped { repo, reason });
                }
            }
        }

        log::info!("Found {} valid mods.", build.stats.accepted);
        progress(BuildProgress::Done {
            accepted: build.stats.accepted,
        });
        build
    }

    /// Resolve a single candidate.
    pub fn process(&self, hit: &SearchHit, progress: &dyn Fn(BuildProgress)) -> Outcome {
        let config = self.config;

        let Some(found) =
            resolve_metadata(self.fetch, &config.raw_url, hit, &config.metadata_paths)
        else {
            return Outcome::Skipped {
                reason: SkipReason::NoMetadata,
                icon: None,
            };
        };
        let meta = found.value;
        log::debug!("  | metadata from {}", found.url);

        let icon = self.icon_for(hit, progress);

        let min_game_version = declared_min_game_version(&meta, config);
        if !is_compatible(&min_game_version, config.min_build) {
            return Outcome::Skipped {
                reason: SkipReason::Incompatible { min_game_version },
                icon: Some(icon),
            };
        }

        let entry = make_entry(hit, &meta, config, &self.markup);
        Outcome::Accepted { entry, icon }
    }

    fn icon_for(&self, hit: &SearchHit, progress: &dyn Fn(BuildProgress)) -> IconOutcome {
        let config = self.config;

        // Low-visibility repositories could push arbitrary images into the catalog
        if hit.stargazers_count < config.icon_min_stars {
            return IconOutcome::Gated;
        }

        let Some(icon) = resolve_icon(
            self.fetch,
            &config.raw_url,
            hit,
            &config.icon_paths,
            config.icon_size,
        ) else {
            return IconOutcome::NotFound;
        };

        let (width, height) = icon.source_size;
        log::info!("  | Found icon file: {width}x{height}");
        progress(BuildProgress::IconFound {
            repo: hit.full_name.clone(),
            width,
            height,
        });
        self.save_icon(&icon)
    }

    fn save_icon(&self, icon: &IconAsset) -> IconOutcome {
        match icon.write_into(self.icons_dir) {
            Ok(path) => IconOutcome::Written(path),
            Err(e) => {
                log::warn!("  | Could not write icon {}: {e}", icon.file_name);
                IconOutcome::WriteFailed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/build_tests.rs"]
mod tests;

//! Harvester configuration.
//!
//! Every tunable of the pipeline lives in [`HarvestConfig`]. The defaults
//! reproduce the production job; a TOML file at
//! `~/.config/modhub/config.toml` (or an explicit path) may override any
//! subset of fields.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Hosting API page size limit. Larger values are silently clamped upstream,
/// which would make the page count computed from `total_count` too small.
const MAX_PER_PAGE: u32 = 100;

/// Configuration for one harvest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Base URL of the code-hosting REST API
    pub api_url: String,
    /// Base URL of the raw file host (`{raw_url}/{owner}/{repo}/{branch}/{path}`)
    pub raw_url: String,
    /// Free-text keyword search
    pub search_term: String,
    /// Topic tags, each searched as `topic:<tag>`
    pub topics: Vec<String>,
    /// Results requested per search page
    pub per_page: u32,
    /// Maximum number of results the search API will page through
    pub search_result_cap: u32,
    /// Timeout for each individual request, in seconds
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Exact `owner/repo` identifiers that never enter the catalog
    pub blacklist: BTreeSet<String>,
    /// Lowest accepted leading build number of `minGameVersion`
    pub min_build: u32,
    /// Assumed `minGameVersion` when a mod does not declare one
    pub default_min_game_version: String,
    /// Display names longer than this (in characters) are truncated
    pub max_name_length: usize,
    /// Side length of the normalized square icons
    pub icon_size: u32,
    /// Repositories need at least this many stars before their icon is used
    pub icon_min_stars: u64,
    /// Metadata file locations, tried in order
    pub metadata_paths: Vec<String>,
    /// Icon file locations, tried in order
    pub icon_paths: Vec<String>,
    /// Primary languages that mark a mod as script-based
    pub script_languages: BTreeSet<String>,
    /// Primary languages that mark a mod as containing compiled code
    pub native_languages: BTreeSet<String>,
    /// Color names recognized inside `[name]` markup tags
    pub color_names: BTreeSet<String>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            raw_url: "https://raw.githubusercontent.com".to_string(),
            search_term: "mindustry mod".to_string(),
            topics: strings(&["mindustry-mod", "mindustry-mod-v6"]),
            per_page: MAX_PER_PAGE,
            search_result_cap: 1000,
            timeout_secs: 10,
            user_agent: concat!("modhub/", env!("CARGO_PKG_VERSION")).to_string(),
            blacklist: set(&[
                "TheSaus/Cumdustry",
                "Anuken/ExampleMod",
                "Anuken/ExampleJavaMod",
                "Anuken/ExampleKotlinMod",
                "pixaxeofpixie/Braindustry-Mod",
                "MoTRona/Colloseus-Mod",
            ]),
            min_build: 105,
            default_min_game_version: "104".to_string(),
            max_name_length: 55,
            icon_size: 64,
            icon_min_stars: 2,
            metadata_paths: strings(&[
                "mod.json",
                "mod.hjson",
                "assets/mod.json",
                "assets/mod.hjson",
            ]),
            icon_paths: strings(&["icon.png", "assets/icon.png"]),
            script_languages: set(&["JavaScript"]),
            native_languages: set(&["Java", "Kotlin", "Groovy"]),
            color_names: set(&[
                "clear", "black", "white", "lightgray", "lightgrey", "gray", "grey",
                "darkgray", "darkgrey", "blue", "navy", "royal", "slate", "sky", "cyan",
                "teal", "green", "acid", "lime", "forest", "olive", "yellow", "gold",
                "goldenrod", "orange", "brown", "tan", "brick", "red", "scarlet", "crimson",
                "coral", "salmon", "pink", "magenta", "purple", "violet", "maroon",
                // UI palette names used by the game
                "accent", "unlaunched", "highlight", "stat",
            ]),
        }
    }
}

impl HarvestConfig {
    /// Load configuration with file overrides applied on top of the defaults.
    ///
    /// An explicit path must exist. Without one, the default config path is
    /// used if present and silently skipped otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::invalid(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }
        if self.icon_size == 0 {
            return Err(ConfigError::invalid("icon_size must be positive"));
        }
        if self.max_name_length == 0 {
            return Err(ConfigError::invalid("max_name_length must be positive"));
        }
        if self.metadata_paths.is_empty() {
            return Err(ConfigError::invalid("metadata_paths must not be empty"));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Default location of the config file: `~/.config/modhub/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("modhub").join("config.toml"))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

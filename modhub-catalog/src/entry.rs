//! Turning a search hit plus its metadata into a catalog entry.

use modhub_core::{
    CatalogEntry, ColorMarkup, HarvestConfig, ModMetadata, SearchHit, remove_newlines,
    truncate_name,
};

const NO_VERSION: &str = "No version provided.";
const NO_NAME: &str = "No name provided.";
const NO_DESCRIPTION: &str = "No description provided.";

/// The mod's declared minimum game version, or the configured legacy default.
pub fn declared_min_game_version(meta: &ModMetadata, config: &HarvestConfig) -> String {
    meta.min_game_version
        .clone()
        .unwrap_or_else(|| config.default_min_game_version.clone())
}

/// Display name: markup and line breaks removed, repository name when empty,
/// truncated to the configured length.
pub fn display_name(
    hit: &SearchHit,
    meta: &ModMetadata,
    config: &HarvestConfig,
    markup: &ColorMarkup,
) -> String {
    let declared = meta.display_name.as_deref().unwrap_or_default();
    let mut name = remove_newlines(&markup.strip(declared));
    if name.is_empty() {
        name = remove_newlines(&markup.strip(hit.repo_name()));
    }
    truncate_name(&name, config.max_name_length)
}

/// Build the catalog entry. Compatibility is not checked here.
pub fn make_entry(
    hit: &SearchHit,
    meta: &ModMetadata,
    config: &HarvestConfig,
    markup: &ColorMarkup,
) -> CatalogEntry {
    let text = |value: Option<&str>, fallback: &str| markup.strip(value.unwrap_or(fallback));
    let language = hit.language();

    CatalogEntry {
        repo: hit.full_name.clone(),
        name: display_name(hit, meta, config, markup),
        version: text(meta.version.as_deref(), NO_VERSION),
        mod_id: text(meta.name.as_deref(), NO_NAME),
        author: text(meta.author.as_deref(), &hit.owner.login),
        last_updated: hit.pushed_at().to_string(),
        stars: hit.stargazers_count,
        min_game_version: declared_min_game_version(meta, config),
        has_scripts: config.script_languages.contains(language),
        has_java: meta.java || config.native_languages.contains(language),
        description: text(meta.description.as_deref(), NO_DESCRIPTION),
    }
}

#[cfg(test)]
#[path = "tests/entry_tests.rs"]
mod tests;

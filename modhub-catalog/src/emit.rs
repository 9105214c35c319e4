//! Catalog ordering and serialization.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use modhub_core::CatalogEntry;

use crate::error::CatalogError;

/// Most-starred first; among equal stars, least recently pushed first.
///
/// The sort is stable, so entries equal on both keys keep their discovery
/// order and identical input always yields identical output.
pub fn sort_entries(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| {
        b.stars
            .cmp(&a.stars)
            .then_with(|| a.last_updated.cmp(&b.last_updated))
    });
}

/// Sort the entries and render them as pretty-printed JSON.
pub fn emit(mut entries: Vec<CatalogEntry>) -> Result<String, CatalogError> {
    sort_entries(&mut entries);
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Write the catalog, replacing any previous version.
///
/// The contents go to a sibling temp file first and are renamed into place,
/// so readers never observe a half-written catalog.
pub fn write_catalog(path: &Path, contents: &str) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CatalogError::output(parent, e))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, contents).map_err(|e| CatalogError::output(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| CatalogError::output(path, e))?;
    Ok(())
}

/// Load a previously written catalog.
pub fn read_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::output(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

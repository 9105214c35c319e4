use std::path::Path;

use modhub_fetch::FetchError;

/// Errors that abort a harvest run.
///
/// Per-candidate problems never show up here; they are logged and the
/// candidate is skipped.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Search failed: {0}")]
    Search(#[from] FetchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn output(path: &Path, source: std::io::Error) -> Self {
        Self::Output {
            path: path.display().to_string(),
            source,
        }
    }
}

use thiserror::Error;

use modhub_catalog::CatalogError;
use modhub_core::ConfigError;
use modhub_fetch::FetchError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client setup failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The harvest run failed
    #[error("Harvest failed: {0}")]
    Catalog(#[from] CatalogError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

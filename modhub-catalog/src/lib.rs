//! Catalog building: per-candidate resolution, filtering, ordering and
//! output for a harvest run.

pub mod build;
pub mod emit;
pub mod entry;
pub mod error;
pub mod run;
pub mod summary;

pub use build::{Build, BuildProgress, CatalogBuilder, IconOutcome, Outcome, SkipReason};
pub use emit::{emit, read_catalog, sort_entries, write_catalog};
pub use entry::make_entry;
pub use error::CatalogError;
pub use run::{HarvestOptions, reset_dir, run};
pub use summary::{BuildStats, HarvestSummary};

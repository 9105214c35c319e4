//! Shared data model and configuration for the mod catalog harvester.
//!
//! This crate has no network or image dependencies. It defines what a search
//! hit, a mod's metadata file and a finished catalog entry look like, the
//! configuration every pipeline stage reads from, and the pure text and
//! version helpers used while turning metadata into catalog entries.

pub mod config;
pub mod error;
pub mod text;
pub mod types;
pub mod version;

pub use config::{HarvestConfig, config_path};
pub use error::ConfigError;
pub use text::{ColorMarkup, remove_newlines, truncate_name};
pub use types::{CatalogEntry, ModMetadata, Owner, SearchHit};
pub use version::{is_compatible, leading_build};

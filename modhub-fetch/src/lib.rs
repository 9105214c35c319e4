pub mod error;
pub mod fallback;
pub mod http;
pub mod icon;
pub mod metadata;
pub mod search;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use error::FetchError;
pub use fallback::{Found, first_success};
pub use http::{Fetch, FetchResponse, HttpFetcher, RateLimit, raw_file_url};
pub use icon::{IconAsset, icon_file_name, normalize_icon, resolve_icon};
pub use metadata::{parse_metadata, resolve_metadata};
pub use search::{Discovery, SearchPage, aggregate, search_url};

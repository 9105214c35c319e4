use serde_json::Value;

use modhub_core::{ModMetadata, SearchHit};

use crate::error::FetchError;
use crate::fallback::{self, Found};
use crate::http::{Fetch, raw_file_url};

/// Parse a metadata file body.
///
/// Strict JSON is tried first; anything it rejects is retried as Hjson, the
/// relaxed dialect mods commonly use (`mod.hjson`: unquoted keys and strings,
/// optional commas, comments, a root object without braces).
pub fn parse_metadata(bytes: &[u8]) -> Result<ModMetadata, FetchError> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_start_matches('\u{feff}');

    let value = parse_value(text)?;
    ModMetadata::from_value(&value)
        .ok_or_else(|| FetchError::metadata("metadata root is not an object"))
}

fn parse_value(text: &str) -> Result<Value, FetchError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let relaxed = deser_hjson::from_str::<Value>(text);
    if let Ok(Value::Object(_)) = relaxed {
        return relaxed.map_err(|e| FetchError::metadata(e.to_string()));
    }

    // Hjson allows the braces around the root object to be omitted
    match deser_hjson::from_str::<Value>(&format!("{{\n{text}\n}}")) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => relaxed.map_err(|e| FetchError::metadata(e.to_string())),
    }
}

/// Resolve a candidate's metadata from the first path that yields a valid
/// file. Returns `None` when every path fails.
pub fn resolve_metadata(
    fetch: &dyn Fetch,
    raw_url: &str,
    hit: &SearchHit,
    paths: &[String],
) -> Option<Found<ModMetadata>> {
    let urls = paths
        .iter()
        .map(|path| raw_file_url(raw_url, &hit.full_name, &hit.default_branch, path));
    fallback::first_success(fetch, urls, parse_metadata)
}

#[cfg(test)]
#[path = "tests/metadata_tests.rs"]
mod tests;

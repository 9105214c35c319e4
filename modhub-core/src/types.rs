//! Data model: search hits, mod metadata files and catalog entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Search ──────────────────────────────────────────────────────────────────

/// One repository returned by the hosting API's search endpoint.
///
/// Only the fields the pipeline reads are kept; everything else in the API
/// response is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// `owner/repo`, the unique key of a candidate
    pub full_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default)]
    pub stargazers_count: u64,
    /// ISO-8601 timestamp of the last push (null for empty repositories)
    #[serde(default)]
    pub pushed_at: Option<String>,
    /// Primary language as detected by the hosting service
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub owner: Owner,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub login: String,
}

fn default_branch() -> String {
    "master".to_string()
}

impl SearchHit {
    /// Repository name without the owner, as reported by the API.
    pub fn repo_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => self
                .full_name
                .split_once('/')
                .map_or(self.full_name.as_str(), |(_, repo)| repo),
        }
    }

    pub fn pushed_at(&self) -> &str {
        self.pushed_at.as_deref().unwrap_or("")
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }
}

// ── Mod metadata ────────────────────────────────────────────────────────────

/// The self-declared descriptor a mod ships as `mod.json` / `mod.hjson`.
///
/// All fields are optional; defaults are applied when the catalog entry is
/// built, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModMetadata {
    /// `displayName`
    pub display_name: Option<String>,
    /// `name`, the mod's internal id
    pub name: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    /// `minGameVersion`
    pub min_game_version: Option<String>,
    /// `java`: the mod declares compiled code regardless of repo language
    pub java: bool,
}

impl ModMetadata {
    /// Read metadata from a parsed document. Returns `None` unless the root is
    /// an object.
    ///
    /// Scalars are read leniently: `minGameVersion: 105` and
    /// `minGameVersion: "105"` are the same thing.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let get = |key: &str| obj.get(key).and_then(scalar_string);

        Some(Self {
            display_name: get("displayName"),
            name: get("name"),
            version: get("version"),
            author: get("author"),
            description: get("description"),
            min_game_version: get("minGameVersion"),
            java: obj.get("java").is_some_and(truthy),
        })
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// One validated, user-facing record of the emitted catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// `owner/repo`
    pub repo: String,
    pub name: String,
    pub version: String,
    pub mod_id: String,
    pub author: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub stars: u64,
    #[serde(rename = "minGameVersion")]
    pub min_game_version: String,
    #[serde(rename = "hasScripts")]
    pub has_scripts: bool,
    #[serde(rename = "hasJava")]
    pub has_java: bool,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hit_from_api_json() {
        let hit: SearchHit = serde_json::from_value(json!({
            "full_name": "someone/cool-mod",
            "name": "cool-mod",
            "default_branch": "main",
            "stargazers_count": 12,
            "pushed_at": "2024-02-03T04:05:06Z",
            "language": "Java",
            "owner": { "login": "someone", "id": 1 },
            "forks": 3
        }))
        .unwrap();
        assert_eq!(hit.full_name, "someone/cool-mod");
        assert_eq!(hit.default_branch, "main");
        assert_eq!(hit.stargazers_count, 12);
        assert_eq!(hit.pushed_at(), "2024-02-03T04:05:06Z");
        assert_eq!(hit.owner.login, "someone");
    }

    #[test]
    fn test_hit_with_null_fields() {
        let hit: SearchHit = serde_json::from_value(json!({
            "full_name": "someone/empty",
            "default_branch": "main",
            "pushed_at": null,
            "language": null,
            "owner": { "login": "someone" }
        }))
        .unwrap();
        assert_eq!(hit.pushed_at(), "");
        assert_eq!(hit.language(), "");
        assert_eq!(hit.stargazers_count, 0);
    }

    #[test]
    fn test_repo_name_falls_back_to_full_name() {
        let hit: SearchHit = serde_json::from_value(json!({
            "full_name": "someone/fallback",
            "owner": { "login": "someone" }
        }))
        .unwrap();
        assert_eq!(hit.repo_name(), "fallback");
        assert_eq!(hit.default_branch, "master");
    }

    #[test]
    fn test_metadata_lenient_scalars() {
        let meta = ModMetadata::from_value(&json!({
            "displayName": "Cool Mod",
            "name": "cool-mod",
            "version": 2,
            "minGameVersion": 105.5,
            "java": "true"
        }))
        .unwrap();
        assert_eq!(meta.display_name.as_deref(), Some("Cool Mod"));
        assert_eq!(meta.version.as_deref(), Some("2"));
        assert_eq!(meta.min_game_version.as_deref(), Some("105.5"));
        assert!(meta.java);
        assert!(meta.author.is_none());
    }

    #[test]
    fn test_metadata_requires_object() {
        assert!(ModMetadata::from_value(&json!(["not", "an", "object"])).is_none());
        assert!(ModMetadata::from_value(&json!("mod")).is_none());
    }

    #[test]
    fn test_catalog_entry_field_names() {
        let entry = CatalogEntry {
            repo: "a/b".into(),
            name: "B".into(),
            version: "1".into(),
            mod_id: "b".into(),
            author: "a".into(),
            last_updated: "2024-01-01T00:00:00Z".into(),
            stars: 3,
            min_game_version: "126".into(),
            has_scripts: false,
            has_java: true,
            description: "d".into(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        for key in [
            "repo",
            "name",
            "version",
            "mod_id",
            "author",
            "lastUpdated",
            "stars",
            "minGameVersion",
            "hasScripts",
            "hasJava",
            "description",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}

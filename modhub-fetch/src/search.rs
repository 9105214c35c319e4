//! Candidate discovery through the hosting API's repository search.
//!
//! One paginated keyword search plus one single-page search per topic tag,
//! merged into a single candidate list in first-seen order. The upstream API
//! is known to repeat repositories across queries, so the merge deduplicates
//! on `full_name` itself instead of trusting the results.

use std::collections::{BTreeSet, HashSet};

use serde::Deserialize;

use modhub_core::{HarvestConfig, SearchHit};

use crate::error::FetchError;
use crate::http::Fetch;

/// One page of `/search/repositories` results.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<SearchHit>,
}

/// The merged result of all search sources.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Unique, non-blacklisted candidates in first-seen order
    pub candidates: Vec<SearchHit>,
    /// Items returned by the keyword search across all of its pages
    pub keyword_hits: usize,
    /// New candidates contributed by each topic search
    pub topic_hits: Vec<(String, usize)>,
    /// Repeated identifiers dropped during the final merge
    pub duplicates: usize,
    /// Candidates removed by the blacklist
    pub blacklisted: usize,
    /// Non-mandatory search requests that failed and were skipped
    pub failed_requests: usize,
}

/// Build a repository search URL.
pub fn search_url(
    api_url: &str,
    query: &str,
    per_page: u32,
    page: Option<u32>,
) -> Result<String, FetchError> {
    let base = format!("{}/search/repositories", api_url.trim_end_matches('/'));
    let mut params = vec![("q", query.to_string()), ("per_page", per_page.to_string())];
    if let Some(page) = page {
        params.push(("page", page.to_string()));
    }
    let url = reqwest::Url::parse_with_params(&base, &params)
        .map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
    Ok(url.to_string())
}

/// Fetch and parse one search page.
pub fn search_page(fetch: &dyn Fetch, url: &str) -> Result<SearchPage, FetchError> {
    let resp = fetch.get(url)?;
    match resp.rate_limit {
        Some(rl) => log::debug!(
            "Search query status {}; queries remaining: {}/{}",
            resp.status,
            rl.remaining,
            rl.limit
        ),
        None => log::debug!("Search query status {}", resp.status),
    }

    if !resp.is_success() {
        return Err(FetchError::status(resp.status, url));
    }
    Ok(serde_json::from_slice(&resp.body)?)
}

/// Run every configured search and merge the results.
///
/// The first keyword page is mandatory: its failure is returned as an error.
/// Any later page or topic search that fails is logged and skipped.
pub fn aggregate(fetch: &dyn Fetch, config: &HarvestConfig) -> Result<Discovery, FetchError> {
    let mut discovery = Discovery::default();

    let first_url = search_url(&config.api_url, &config.search_term, config.per_page, None)?;
    let first = search_page(fetch, &first_url)?;

    let reachable = first.total_count.min(u64::from(config.search_result_cap)) as u32;
    let pages = reachable.div_ceil(config.per_page);
    let mut merged = first.items;

    // Pages of one query are not deduplicated against each other here
    for page in 2..=pages {
        let url = search_url(&config.api_url, &config.search_term, config.per_page, Some(page))?;
        match search_page(fetch, &url) {
            Ok(result) => merged.extend(result.items),
            Err(e) => {
                log::warn!("Search page {page} failed, skipping: {e}");
                discovery.failed_requests += 1;
            }
        }
    }
    discovery.keyword_hits = merged.len();
    log::info!(
        "Found {} mods via search: {}",
        discovery.keyword_hits,
        config.search_term
    );

    let mut seen: HashSet<String> = merged.iter().map(|h| h.full_name.clone()).collect();
    for topic in &config.topics {
        let url = search_url(
            &config.api_url,
            &format!("topic:{topic}"),
            config.per_page,
            None,
        )?;
        match search_page(fetch, &url) {
            Ok(result) => {
                let before = merged.len();
                for hit in result.items {
                    if seen.insert(hit.full_name.clone()) {
                        merged.push(hit);
                    }
                }
                let added = merged.len() - before;
                log::info!("Found {added} mods via topic: {topic}");
                discovery.topic_hits.push((topic.clone(), added));
            }
            Err(e) => {
                log::warn!("Topic search '{topic}' failed, skipping: {e}");
                discovery.failed_requests += 1;
            }
        }
    }

    let (candidates, duplicates, blacklisted) = dedup_and_filter(merged, &config.blacklist);
    discovery.candidates = candidates;
    discovery.duplicates = duplicates;
    discovery.blacklisted = blacklisted;

    log::info!("Total mods found: {}", discovery.candidates.len());
    Ok(discovery)
}

/// Keep the first occurrence of every identifier and drop blacklisted ones.
///
/// Returns the survivors with the number of duplicates and blacklisted
/// entries removed.
pub fn dedup_and_filter(
    hits: Vec<SearchHit>,
    blacklist: &BTreeSet<String>,
) -> (Vec<SearchHit>, usize, usize) {
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    let mut blacklisted = 0;

    let kept = hits
        .into_iter()
        .filter(|hit| {
            if !seen.insert(hit.full_name.clone()) {
                duplicates += 1;
                return false;
            }
            if blacklist.contains(&hit.full_name) {
                blacklisted += 1;
                return false;
            }
            true
        })
        .collect();

    (kept, duplicates, blacklisted)
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;

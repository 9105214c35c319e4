use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

use modhub_core::HarvestConfig;

use crate::error::FetchError;

/// Blocking "GET url -> status + body" capability.
///
/// Everything upstream of the transport talks to this trait, so tests can
/// swap in canned responses. A non-success status is a response, not an
/// error; errors are reserved for requests that produced no response at all.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// A completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// API quota headers, when the server sent them
    pub rate_limit: Option<RateLimit>,
}

impl FetchResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            rate_limit: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `X-RateLimit-Remaining` / `X-RateLimit-Limit` from an API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u32,
    pub limit: u32,
}

impl RateLimit {
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
        };
        Some(Self {
            remaining: read("x-ratelimit-remaining")?,
            limit: read("x-ratelimit-limit")?,
        })
    }
}

/// [`Fetch`] over a blocking reqwest client.
///
/// Requests to the API base URL carry the API media type and, if a token is
/// configured, a bearer authorization header. Raw file requests go out bare.
pub struct HttpFetcher {
    http: reqwest::blocking::Client,
    api_url: String,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: &HarvestConfig, token: Option<String>) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Token from the `GITHUB_TOKEN` environment variable, if set.
    pub fn token_from_env() -> Option<String> {
        std::env::var("GITHUB_TOKEN").ok()
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let mut request = self.http.get(url);

        if url.starts_with(&self.api_url) {
            request = request.header(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
            if let Some(ref token) = self.token {
                request = request.header(AUTHORIZATION, format!("Bearer {token}"));
            }
        }

        let resp = request.send()?;
        let status = resp.status().as_u16();
        let rate_limit = RateLimit::from_headers(resp.headers());
        let body = resp.bytes()?.to_vec();

        Ok(FetchResponse {
            status,
            body,
            rate_limit,
        })
    }
}

/// Raw file URL for `path` on `branch` of `full_name`.
pub fn raw_file_url(raw_url: &str, full_name: &str, branch: &str, path: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        raw_url.trim_end_matches('/'),
        full_name,
        branch,
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_file_url() {
        assert_eq!(
            raw_file_url("https://raw.example.com/", "a/b", "main", "assets/mod.json"),
            "https://raw.example.com/a/b/main/assets/mod.json"
        );
    }

    #[test]
    fn test_rate_limit_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("9"));
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("10"));
        assert_eq!(
            RateLimit::from_headers(&headers),
            Some(RateLimit {
                remaining: 9,
                limit: 10
            })
        );
    }

    #[test]
    fn test_rate_limit_missing() {
        assert_eq!(RateLimit::from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_success_range() {
        let mut resp = FetchResponse::ok(Vec::new());
        assert!(resp.is_success());
        resp.status = 404;
        assert!(!resp.is_success());
    }
}

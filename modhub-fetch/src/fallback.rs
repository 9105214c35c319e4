use crate::error::FetchError;
use crate::http::Fetch;

/// A value decoded from one of several candidate URLs.
#[derive(Debug, Clone)]
pub struct Found<T> {
    pub value: T,
    pub url: String,
}

/// Try each URL in order and return the first that both answers with a
/// success status and decodes.
///
/// Transport errors, non-success statuses and decode failures all mean "try
/// the next one". Later URLs are never requested once one succeeds.
pub fn first_success<T, I, F>(fetch: &dyn Fetch, urls: I, decode: F) -> Option<Found<T>>
where
    I: IntoIterator<Item = String>,
    F: Fn(&[u8]) -> Result<T, FetchError>,
{
    for url in urls {
        match attempt(fetch, &url, &decode) {
            Ok(value) => return Some(Found { value, url }),
            Err(FetchError::Status { status: 404, .. }) => {
                log::debug!("  not found: {url}");
            }
            Err(e) => log::debug!("  {url}: {e}"),
        }
    }
    None
}

fn attempt<T, F>(fetch: &dyn Fetch, url: &str, decode: &F) -> Result<T, FetchError>
where
    F: Fn(&[u8]) -> Result<T, FetchError>,
{
    let resp = fetch.get(url)?;
    if !resp.is_success() {
        return Err(FetchError::status(resp.status, url));
    }
    decode(&resp.body)
}

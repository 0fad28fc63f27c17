//! Document fetchers
//!
//! Design: extractors never talk to the network directly. They ask a
//! [`DocumentFetcher`] for the raw HTML of a URL and parse it themselves, so
//! tests can swap in canned documents and count fetch calls.

mod http;

pub use http::{HttpFetcher, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT};

use crate::client::FetchOptions;
use crate::error::FetchError;
use async_trait::async_trait;
use url::Url;

/// Trait for anything that can turn a URL into an HTML document body
///
/// Implementations issue exactly one request per call and report any
/// failure (network, non-2xx status, unreadable body) as a [`FetchError`].
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Identifier for this fetcher (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Fetch the document at `url` and return its body as text
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Validate a URL against scheme rules and the allow/block prefix lists
///
/// Returns the parsed URL on success.
pub(crate) fn validate_url(url: &str, options: &FetchOptions) -> Result<Url, FetchError> {
    if url.is_empty() {
        return Err(FetchError::MissingUrl);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(FetchError::InvalidUrl);
    }

    let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl)?;

    if !options.allow_prefixes.is_empty()
        && !options
            .allow_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix))
    {
        return Err(FetchError::BlockedUrl);
    }

    if options
        .block_prefixes
        .iter()
        .any(|prefix| url.starts_with(prefix))
    {
        return Err(FetchError::BlockedUrl);
    }

    Ok(parsed)
}

//! Page classification
//!
//! Album and track URLs are recognised from their path alone. Any other URL
//! (an artist root, a `/releases` listing, ...) is fetched once and the page's
//! own `og:type` / `og:url` metadata decides. A releases listing renders the
//! latest release, so it classifies as an album whose canonical URL differs
//! from the one requested.

use crate::error::FetchError;
use crate::fetchers::{DocumentFetcher, HttpFetcher};
use crate::pages::GenericPage;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Kind reported for album URLs
pub const ALBUM_KIND: &str = "album";

/// Kind reported for track URLs
pub const TRACK_KIND: &str = "track";

/// Page kind and canonical URL of a classified URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Page kind, e.g. "album", "track", "band"; empty if undeclared
    pub kind: String,
    /// Canonical URL; empty if undeclared
    pub canonical_url: String,
}

impl Classification {
    fn new(kind: impl Into<String>, canonical_url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            canonical_url: canonical_url.into(),
        }
    }
}

impl From<GenericPage> for Classification {
    fn from(page: GenericPage) -> Self {
        Self {
            kind: page.kind,
            canonical_url: page.canonical_url,
        }
    }
}

/// Classify `url` over HTTP
///
/// See [`classify_with`].
pub async fn classify(url: &str) -> Result<Classification, FetchError> {
    classify_with(&HttpFetcher::new(), url).await
}

/// Classify `url`, using `fetcher` when the URL path is not conclusive
///
/// Album and track URLs are returned unchanged without any request. For
/// everything else exactly one fetch is made.
pub async fn classify_with<F>(fetcher: &F, url: &str) -> Result<Classification, FetchError>
where
    F: DocumentFetcher + ?Sized,
{
    if let Some(classification) = classify_by_path(url) {
        return Ok(classification);
    }

    let mut page = GenericPage::new(url);
    page.fetch_with(fetcher).await?;
    debug!(url, kind = %page.kind, canonical_url = %page.canonical_url, "Classified from page metadata");
    Ok(page.into())
}

/// Classify from the URL path alone, without any request
///
/// Falls back to matching the raw string when `url` does not parse.
pub(crate) fn classify_by_path(url: &str) -> Option<Classification> {
    let parsed = Url::parse(url).ok();
    let path = parsed.as_ref().map(Url::path).unwrap_or(url);

    let kind = if path.contains("/album/") {
        ALBUM_KIND
    } else if path.contains("/track/") {
        TRACK_KIND
    } else {
        return None;
    };

    debug!(url, kind, "Classified from URL path");
    Some(Classification::new(kind, url))
}

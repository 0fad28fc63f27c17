//! Fetch configuration and the top-level scrape entry points
//!
//! [`scrape`] classifies a URL with [`classify`](crate::classify()) and runs
//! the matching page extractor.

use crate::classify::{classify_by_path, ALBUM_KIND, TRACK_KIND};
use crate::error::FetchError;
use crate::fetchers::{DocumentFetcher, HttpFetcher};
use crate::pages::{AlbumPage, GenericPage, TrackPage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Options for the HTTP fetcher
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Deadline for the whole request including the body
    pub timeout: Option<Duration>,
    /// Largest body accepted, in bytes
    pub max_body_bytes: Option<usize>,
    /// Allow list of URL prefixes
    pub allow_prefixes: Vec<String>,
    /// Block list of URL prefixes
    pub block_prefixes: Vec<String>,
}

/// Result of [`scrape`]: the extracted record for whatever the URL points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScrapedPage {
    /// An album page
    Album(AlbumPage),
    /// A track page
    Track(TrackPage),
    /// Any other page, described by its declared metadata only
    Other(GenericPage),
}

/// Classify `url` and extract the matching page over HTTP
///
/// Uses default [`FetchOptions`]. For custom options, pass an
/// [`HttpFetcher::with_options`] to [`scrape_with`].
pub async fn scrape(url: &str) -> Result<ScrapedPage, FetchError> {
    scrape_with(&HttpFetcher::new(), url).await
}

/// Classify `url` and extract the matching page through `fetcher`
///
/// Album and track URLs are fetched once. Other URLs are fetched to read their
/// declared kind; if that is album or track, the declared canonical URL (or
/// `url` itself when none is declared) is then fetched with the matching
/// extractor.
pub async fn scrape_with<F>(fetcher: &F, url: &str) -> Result<ScrapedPage, FetchError>
where
    F: DocumentFetcher + ?Sized,
{
    if url.is_empty() {
        return Err(FetchError::MissingUrl);
    }

    let (kind, target) = match classify_by_path(url) {
        Some(classification) => (classification.kind, classification.canonical_url),
        None => {
            let mut page = GenericPage::new(url);
            page.fetch_with(fetcher).await?;
            if page.kind != ALBUM_KIND && page.kind != TRACK_KIND {
                return Ok(ScrapedPage::Other(page));
            }
            let target = if page.canonical_url.is_empty() {
                page.url
            } else {
                page.canonical_url
            };
            (page.kind, target)
        }
    };

    debug!(url, kind = %kind, target = %target, fetcher = fetcher.name(), "Scraping page");

    if kind == ALBUM_KIND {
        let mut album = AlbumPage::new(target);
        album.fetch_with(fetcher).await?;
        Ok(ScrapedPage::Album(album))
    } else {
        let mut track = TrackPage::new(target);
        track.fetch_with(fetcher).await?;
        Ok(ScrapedPage::Track(track))
    }
}

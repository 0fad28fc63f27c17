use super::{BY_ARTIST_SELECTOR, COVER_SELECTOR, DATE_PUBLISHED_SELECTOR, NAME_SELECTOR};
use crate::document::Document;
use crate::error::FetchError;
use crate::extract::{apply_rules, FieldRule, Source};
use crate::fetchers::{DocumentFetcher, HttpFetcher};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

const IN_ALBUM_SELECTOR: &str = r#"span[itemprop="inAlbum"] a"#;

const RULES: &[FieldRule<TrackPage>] = &[
    FieldRule {
        selector: BY_ARTIST_SELECTOR,
        source: Source::Text,
        apply: |page, value| page.artist = value,
    },
    FieldRule {
        selector: BY_ARTIST_SELECTOR,
        source: Source::TrimmedAttr("href"),
        apply: |page, value| page.artist_url = value,
    },
    FieldRule {
        selector: IN_ALBUM_SELECTOR,
        source: Source::Text,
        apply: |page, value| page.album = value,
    },
    FieldRule {
        selector: IN_ALBUM_SELECTOR,
        source: Source::TrimmedAttr("href"),
        apply: |page, value| page.album_url = resolve_path(&page.url, value),
    },
    FieldRule {
        selector: NAME_SELECTOR,
        source: Source::Text,
        apply: |page, value| page.title = value,
    },
    FieldRule {
        selector: COVER_SELECTOR,
        source: Source::Attr("src"),
        apply: |page, value| page.cover_image_src = value,
    },
    // Kept as the raw attribute string; no date parsing.
    FieldRule {
        selector: DATE_PUBLISHED_SELECTOR,
        source: Source::Attr("content"),
        apply: |page, value| page.published_date = value,
    },
];

/// A single track page
///
/// `album_url` is always absolute once populated: a path-only link on the
/// page is resolved against the scheme and host of `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPage {
    pub url: String,
    pub title: String,
    pub artist: String,
    pub artist_url: String,
    pub album: String,
    pub album_url: String,
    pub cover_image_src: String,
    pub published_date: String,
}

impl TrackPage {
    /// Create an unpopulated track page for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Fetch the page over HTTP and extract the track fields
    pub async fn fetch(&mut self) -> Result<(), FetchError> {
        self.fetch_with(&HttpFetcher::new()).await
    }

    /// Fetch the page through `fetcher` and extract the track fields
    pub async fn fetch_with<F>(&mut self, fetcher: &F) -> Result<(), FetchError>
    where
        F: DocumentFetcher + ?Sized,
    {
        let html = fetcher.fetch_html(&self.url).await?;
        self.populate(&Document::parse(&html));
        Ok(())
    }

    /// Fill fields from an already parsed document
    pub fn populate(&mut self, doc: &Document) {
        let matched = apply_rules(doc, RULES, self);
        debug!(url = %self.url, title = %self.title, matched, "Extracted track page");
    }
}

/// Turn a path-only reference into an absolute URL on the host of `base`
///
/// Anything that does not start with `/` is returned verbatim, as is the
/// reference when `base` cannot be parsed. Only the path, query and fragment
/// of `base` are replaced; its scheme, host and port are kept, also for
/// `//other.host/x` style references.
fn resolve_path(base: &str, reference: String) -> String {
    if !reference.starts_with('/') {
        return reference;
    }
    let mut resolved = match Url::parse(base) {
        Ok(url) if !url.cannot_be_a_base() => url,
        Ok(_) => return reference,
        Err(e) => {
            warn!(base, reference = %reference, error = %e, "Could not resolve album link");
            return reference;
        }
    };

    let (rest, fragment) = match reference.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (reference.as_str(), None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    resolved.set_path(path);
    resolved.set_query(query);
    resolved.set_fragment(fragment);
    resolved.into()
}

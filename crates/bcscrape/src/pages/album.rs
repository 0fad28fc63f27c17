use super::{BY_ARTIST_SELECTOR, COVER_SELECTOR, DATE_PUBLISHED_SELECTOR, NAME_SELECTOR};
use crate::document::Document;
use crate::error::FetchError;
use crate::extract::{apply_rules, FieldRule, Source};
use crate::fetchers::{DocumentFetcher, HttpFetcher};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DESCRIPTION_SELECTOR: &str = r#"div.tralbumData[itemprop="description"]"#;

// Unlike track pages, the artist link is stored exactly as written: no
// trimming and no resolution against the page URL.
const RULES: &[FieldRule<AlbumPage>] = &[
    FieldRule {
        selector: BY_ARTIST_SELECTOR,
        source: Source::Text,
        apply: |page, value| page.artist = value,
    },
    FieldRule {
        selector: BY_ARTIST_SELECTOR,
        source: Source::Attr("href"),
        apply: |page, value| page.artist_url = value,
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
    FieldRule {
        selector: DESCRIPTION_SELECTOR,
        source: Source::Text,
        apply: |page, value| page.description = value,
    },
    FieldRule {
        selector: DATE_PUBLISHED_SELECTOR,
        source: Source::Attr("content"),
        apply: |page, value| page.published_date = value,
    },
];

/// An album (release) page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumPage {
    pub url: String,
    pub artist: String,
    pub artist_url: String,
    pub title: String,
    pub description: String,
    pub cover_image_src: String,
    /// Raw `datePublished` metadata, e.g. "20170526"
    pub published_date: String,
}

impl AlbumPage {
    /// Create an unpopulated album page for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Fetch the page over HTTP and extract the album fields
    pub async fn fetch(&mut self) -> Result<(), FetchError> {
        self.fetch_with(&HttpFetcher::new()).await
    }

    /// Fetch the page through `fetcher` and extract the album fields
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
        debug!(url = %self.url, title = %self.title, matched, "Extracted album page");
    }
}

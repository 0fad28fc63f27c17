use crate::document::Document;
use crate::error::FetchError;
use crate::extract::{apply_rules, FieldRule, Source};
use crate::fetchers::{DocumentFetcher, HttpFetcher};
use serde::{Deserialize, Serialize};
use tracing::debug;

const RULES: &[FieldRule<GenericPage>] = &[
    FieldRule {
        selector: r#"meta[property="og:type"]"#,
        source: Source::Attr("content"),
        apply: |page, value| page.kind = value,
    },
    FieldRule {
        selector: r#"meta[property="og:url"]"#,
        source: Source::Attr("content"),
        apply: |page, value| page.canonical_url = value,
    },
];

/// A page of unknown type, described only by its declared metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericPage {
    /// URL the page is requested from
    pub url: String,
    /// Declared page kind (`og:type`), e.g. "album" or "band"
    pub kind: String,
    /// Declared canonical URL (`og:url`)
    pub canonical_url: String,
}

impl GenericPage {
    /// Create an unpopulated page for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Fetch the page over HTTP and read its declared type and canonical URL
    pub async fn fetch(&mut self) -> Result<(), FetchError> {
        self.fetch_with(&HttpFetcher::new()).await
    }

    /// Fetch the page through `fetcher` and read its declared metadata
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
        debug!(url = %self.url, kind = %self.kind, matched, "Read page metadata");
    }
}

//! Page records and their extractors
//!
//! Each record starts out holding only its URL. `fetch` issues one request
//! for that URL and fills in every field whose source element is present;
//! fields without a matching element stay empty.

mod album;
mod generic;
mod track;

pub use album::AlbumPage;
pub use generic::GenericPage;
pub use track::TrackPage;

/// Selector for the artist link shared by track and album pages
pub(crate) const BY_ARTIST_SELECTOR: &str = r#"span[itemprop="byArtist"] a"#;

/// Selector for the page title heading
pub(crate) const NAME_SELECTOR: &str = r#"h2[itemprop="name"]"#;

/// Selector for the cover art inside the artwork container
pub(crate) const COVER_SELECTOR: &str = r#"#tralbumArt img[itemprop="image"]"#;

/// Selector for the publish date metadata
pub(crate) const DATE_PUBLISHED_SELECTOR: &str = r#"meta[itemprop="datePublished"]"#;

//! bcscrape - metadata scraper for Bandcamp-style music pages
//!
//! This crate fetches album, track and artist pages and reads their embedded
//! semantic markup (`itemprop` attributes and `og:` metadata) into plain
//! records.
//!
//! ## Pages
//!
//! - [`AlbumPage`] - title, artist, cover art, description, publish date
//! - [`TrackPage`] - title, artist, album (with an absolute album URL), cover
//!   art, publish date
//! - [`GenericPage`] - declared page kind and canonical URL only
//!
//! Each page starts with just a URL; `fetch` issues one GET and fills in every
//! field whose element is present. Missing elements leave fields empty and
//! are never an error.
//!
//! ## Classification
//!
//! [`classify`] maps any URL to a page kind and canonical URL, and [`scrape`]
//! runs the matching extractor:
//!
//! ```no_run
//! # async fn run() -> Result<(), bcscrape::FetchError> {
//! let found = bcscrape::classify("https://solstafir.bandcamp.com/releases").await?;
//! assert_eq!(found.kind, "album");
//!
//! let mut album = bcscrape::AlbumPage::new(found.canonical_url);
//! album.fetch().await?;
//! println!("{} by {}", album.title, album.artist);
//! # Ok(())
//! # }
//! ```
//!
//! ## Fetchers
//!
//! All network access goes through the [`DocumentFetcher`] trait.
//! [`HttpFetcher`] is the reqwest-backed implementation; the `*_with`
//! variants of every operation accept any other implementation.

mod classify;
pub mod client;
pub mod document;
mod error;
mod extract;
pub mod fetchers;
mod pages;

pub use classify::{classify, classify_with, Classification, ALBUM_KIND, TRACK_KIND};
pub use client::{scrape, scrape_with, FetchOptions, ScrapedPage};
pub use document::{Document, Element};
pub use error::FetchError;
pub use fetchers::{DocumentFetcher, HttpFetcher};
pub use pages::{AlbumPage, GenericPage, TrackPage};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = concat!("bcscrape/", env!("CARGO_PKG_VERSION"));

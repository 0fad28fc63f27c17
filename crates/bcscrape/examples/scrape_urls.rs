//! Example: Classify and scrape live Bandcamp URLs
//!
//! Run with: cargo run -p bcscrape --example scrape_urls
//!
//! Needs network access. Each case classifies its URL, scrapes it and checks
//! the result against the expected kind and title.

use bcscrape::{classify, scrape, ScrapedPage};

/// Test case definition
struct TestCase {
    url: &'static str,
    description: &'static str,
    expect_kind: &'static str,
    expect_title: Option<&'static str>,
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        url: "https://solstafir.bandcamp.com/album/berdreyminn",
        description: "Album page (classified from URL)",
        expect_kind: "album",
        expect_title: Some("Berdreyminn"),
    },
    TestCase {
        url: "https://solstafir.bandcamp.com/releases",
        description: "Releases listing (resolves to latest album)",
        expect_kind: "album",
        expect_title: None,
    },
    TestCase {
        url: "https://solstafir.bandcamp.com/",
        description: "Artist root page",
        expect_kind: "band",
        expect_title: None,
    },
];

#[tokio::main]
async fn main() {
    println!("bcscrape URL Examples");
    println!("=====================\n");

    let mut passed = 0;
    let mut failed = 0;

    for (i, case) in TEST_CASES.iter().enumerate() {
        println!("{}. {}", i + 1, case.description);
        println!("   URL: {}", case.url);

        let result = match classify(case.url).await {
            Ok(found) => {
                println!("   Kind: {}", found.kind);
                println!("   Canonical: {}", found.canonical_url);
                scrape(case.url).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(page) => {
                print_page_summary(&page);
                if check_expectations(case, &page) {
                    println!("   ✓ PASS\n");
                    passed += 1;
                } else {
                    println!("   ✗ FAIL (expectations not met)\n");
                    failed += 1;
                }
            }
            Err(e) => {
                println!("   Error: {}", e);
                println!("   ✗ FAIL\n");
                failed += 1;
            }
        }
    }

    println!("=====================");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn print_page_summary(page: &ScrapedPage) {
    match page {
        ScrapedPage::Album(album) => {
            println!("   Album: {} by {}", album.title, album.artist);
            println!("   Published: {}", album.published_date);
        }
        ScrapedPage::Track(track) => {
            println!("   Track: {} by {}", track.title, track.artist);
            println!("   From: {} ({})", track.album, track.album_url);
        }
        ScrapedPage::Other(generic) => {
            println!("   Page: {} at {}", generic.kind, generic.canonical_url);
        }
    }
}

fn check_expectations(case: &TestCase, page: &ScrapedPage) -> bool {
    let (kind, title) = match page {
        ScrapedPage::Album(album) => ("album", album.title.as_str()),
        ScrapedPage::Track(track) => ("track", track.title.as_str()),
        ScrapedPage::Other(generic) => (generic.kind.as_str(), ""),
    };

    if kind != case.expect_kind {
        println!("   Expected kind '{}', got '{}'", case.expect_kind, kind);
        return false;
    }

    if let Some(expected_title) = case.expect_title {
        if title != expected_title {
            println!("   Expected title '{}', got '{}'", expected_title, title);
            return false;
        }
    }

    true
}

//! bcscrape CLI - classify and scrape Bandcamp-style pages

use bcscrape::{
    classify_with, scrape_with, AlbumPage, Classification, DocumentFetcher, FetchError,
    FetchOptions, GenericPage, HttpFetcher, ScrapedPage, TrackPage,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Frontmatter of the extracted fields, description as body
    #[default]
    Md,
    /// JSON format
    Json,
}

/// bcscrape - metadata scraper for Bandcamp-style music pages
#[derive(Parser, Debug)]
#[command(name = "bcscrape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short, global = true, default_value = "md")]
    output: OutputFormat,

    /// Custom User-Agent
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the page kind and canonical URL of a URL
    Classify {
        /// URL to classify
        url: String,
    },
    /// Read only the declared kind and canonical URL of a page
    Page {
        /// URL to fetch
        url: String,
    },
    /// Extract a track page
    Track {
        /// Track page URL
        url: String,
    },
    /// Extract an album page
    Album {
        /// Album page URL
        url: String,
    },
    /// Classify a URL and extract whatever it points at
    Scrape {
        /// URL to scrape
        url: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let fetcher = HttpFetcher::with_options(FetchOptions {
        user_agent: cli.user_agent,
        timeout: cli.timeout.map(Duration::from_secs),
        ..Default::default()
    });

    match run(cli.command, &fetcher, cli.output).await {
        Ok(output) => writeln_safe(&output),
        Err(e) => exit_with_error(&e),
    }
}

async fn run(
    command: Commands,
    fetcher: &HttpFetcher,
    output: OutputFormat,
) -> Result<String, FetchError> {
    let options = fetcher.options();
    tracing::debug!(
        ?command,
        fetcher = fetcher.name(),
        user_agent = ?options.user_agent,
        timeout = ?options.timeout,
        "Running command"
    );
    match command {
        Commands::Classify { url } => {
            let found = classify_with(fetcher, &url).await?;
            Ok(render_classification(&found, output))
        }
        Commands::Page { url } => {
            let mut page = GenericPage::new(url);
            page.fetch_with(fetcher).await?;
            Ok(render_page(&ScrapedPage::Other(page), output))
        }
        Commands::Track { url } => {
            let mut track = TrackPage::new(url);
            track.fetch_with(fetcher).await?;
            Ok(render_page(&ScrapedPage::Track(track), output))
        }
        Commands::Album { url } => {
            let mut album = AlbumPage::new(url);
            album.fetch_with(fetcher).await?;
            Ok(render_page(&ScrapedPage::Album(album), output))
        }
        Commands::Scrape { url } => {
            let page = scrape_with(fetcher, &url).await?;
            Ok(render_page(&page, output))
        }
    }
}

fn exit_with_error(e: &FetchError) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn render_classification(found: &Classification, output: OutputFormat) -> String {
    match output {
        OutputFormat::Md => format_frontmatter(
            &[
                ("kind", found.kind.as_str()),
                ("canonical_url", found.canonical_url.as_str()),
            ],
            "",
        ),
        OutputFormat::Json => to_json(found),
    }
}

fn render_page(page: &ScrapedPage, output: OutputFormat) -> String {
    match output {
        OutputFormat::Md => format_page_md(page),
        OutputFormat::Json => to_json(page),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        std::process::exit(1);
    })
}

/// Format a page as frontmatter; an album description becomes the body
fn format_page_md(page: &ScrapedPage) -> String {
    match page {
        ScrapedPage::Album(album) => format_frontmatter(
            &[
                ("type", "album"),
                ("url", album.url.as_str()),
                ("title", album.title.as_str()),
                ("artist", album.artist.as_str()),
                ("artist_url", album.artist_url.as_str()),
                ("cover_image_src", album.cover_image_src.as_str()),
                ("published_date", album.published_date.as_str()),
            ],
            album.description.as_str(),
        ),
        ScrapedPage::Track(track) => format_frontmatter(
            &[
                ("type", "track"),
                ("url", track.url.as_str()),
                ("title", track.title.as_str()),
                ("artist", track.artist.as_str()),
                ("artist_url", track.artist_url.as_str()),
                ("album", track.album.as_str()),
                ("album_url", track.album_url.as_str()),
                ("cover_image_src", track.cover_image_src.as_str()),
                ("published_date", track.published_date.as_str()),
            ],
            "",
        ),
        ScrapedPage::Other(generic) => format_frontmatter(
            &[
                ("type", "other"),
                ("url", generic.url.as_str()),
                ("kind", generic.kind.as_str()),
                ("canonical_url", generic.canonical_url.as_str()),
            ],
            "",
        ),
    }
}

/// Build a `---` delimited frontmatter block, skipping empty values
fn format_frontmatter(fields: &[(&str, &str)], body: &str) -> String {
    let mut output = String::from("---\n");
    for (key, value) in fields {
        if !value.is_empty() {
            output.push_str(&format!("{}: {}\n", key, frontmatter_value(value)));
        }
    }
    output.push_str("---\n");
    output.push_str(body);
    output
}

/// Characters that change the meaning of a plain YAML scalar when leading
const YAML_INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    '`',
];

/// Double-quote a value when it would not read back as the same plain scalar
fn frontmatter_value(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.starts_with(YAML_INDICATORS)
        || value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || value.trim() != value
        || value.chars().any(char::is_control);
    if !needs_quotes {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_album_md() {
        let page = ScrapedPage::Album(AlbumPage {
            title: "Berdreyminn".to_string(),
            artist: "Sólstafir".to_string(),
            published_date: "20170526".to_string(),
            description: "Sixth album.".to_string(),
            ..AlbumPage::new("https://solstafir.bandcamp.com/album/berdreyminn")
        });

        let output = format_page_md(&page);

        assert!(output.starts_with("---\ntype: album\n"));
        assert!(output.contains("url: https://solstafir.bandcamp.com/album/berdreyminn\n"));
        assert!(output.contains("title: Berdreyminn\n"));
        assert!(output.contains("artist: Sólstafir\n"));
        assert!(output.contains("published_date: 20170526\n"));
        assert!(output.ends_with("---\nSixth album."));
    }

    #[test]
    fn test_format_md_skips_empty_fields() {
        let page = ScrapedPage::Track(TrackPage {
            title: "Ísafold".to_string(),
            ..TrackPage::new("https://solstafir.bandcamp.com/track/safold")
        });

        let output = format_page_md(&page);

        assert!(output.contains("title: Ísafold\n"));
        assert!(!output.contains("album_url"));
        assert!(!output.contains("published_date"));
        assert!(output.ends_with("---\n"));
    }

    #[test]
    fn test_frontmatter_quotes_ambiguous_values() {
        let page = ScrapedPage::Album(AlbumPage {
            title: "Live: Reykjavík".to_string(),
            artist: "- dashes -".to_string(),
            artist_url: "/ ".to_string(),
            ..AlbumPage::new("https://solstafir.bandcamp.com/album/live")
        });

        let output = format_page_md(&page);

        assert!(output.contains("title: \"Live: Reykjavík\"\n"));
        assert!(output.contains("artist: \"- dashes -\"\n"));
        assert!(output.contains("artist_url: \"/ \"\n"));
        // URLs and plain dates stay unquoted
        assert!(output.contains("url: https://solstafir.bandcamp.com/album/live\n"));
    }

    #[test]
    fn test_frontmatter_value_escapes() {
        assert_eq!(frontmatter_value("Berdreyminn"), "Berdreyminn");
        assert_eq!(frontmatter_value("20170526"), "20170526");
        assert_eq!(frontmatter_value("say \"hi\": now"), r#""say \"hi\": now""#);
        assert_eq!(frontmatter_value("line\nbreak"), r#""line\nbreak""#);
        assert_eq!(frontmatter_value("#tag"), r##""#tag""##);
    }

    #[test]
    fn test_render_classification() {
        let found = Classification {
            kind: "album".to_string(),
            canonical_url: "https://solstafir.bandcamp.com/album/berdreyminn".to_string(),
        };

        let md = render_classification(&found, OutputFormat::Md);
        assert_eq!(
            md,
            "---\nkind: album\ncanonical_url: https://solstafir.bandcamp.com/album/berdreyminn\n---\n"
        );

        let json = render_classification(&found, OutputFormat::Json);
        assert!(json.contains("\"kind\": \"album\""));
    }

    #[test]
    fn test_render_other_page_json() {
        let page = ScrapedPage::Other(GenericPage {
            url: "https://solstafir.bandcamp.com/".to_string(),
            kind: "band".to_string(),
            canonical_url: "https://solstafir.bandcamp.com".to_string(),
        });

        let json = render_page(&page, OutputFormat::Json);
        assert!(json.contains("\"type\": \"other\""));
        assert!(json.contains("\"kind\": \"band\""));
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "bcscrape",
            "album",
            "https://solstafir.bandcamp.com/album/berdreyminn",
            "--output",
            "json",
            "--timeout",
            "5",
        ]);
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.timeout, Some(5));
        assert!(matches!(cli.command, Commands::Album { .. }));
    }
}

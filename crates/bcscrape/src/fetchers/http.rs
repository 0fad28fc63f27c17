//! HTTP document fetcher
//!
//! Issues a single GET per call and returns the body as text. A fresh
//! `reqwest::Client` is built for every call; no client is shared between
//! fetches.

use crate::client::FetchOptions;
use crate::error::FetchError;
use crate::fetchers::{validate_url, DocumentFetcher};
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, warn};

/// Content type prefixes that can never hold a page document
const BINARY_PREFIXES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
    "application/x-tar",
    "font/",
];

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Total timeout (headers + body) when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body size cap when none is configured
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// HTTP fetcher backed by reqwest
///
/// Handles:
/// - User-Agent and Accept headers
/// - Allow/block prefix lists
/// - Non-2xx statuses and binary content as errors
/// - A deadline covering the whole request and a body size cap
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    options: FetchOptions,
}

impl HttpFetcher {
    /// Create a fetcher with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher with custom options
    pub fn with_options(options: FetchOptions) -> Self {
        Self { options }
    }

    /// Options this fetcher was built with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .options
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html, application/xhtml+xml, */*;q=0.8"),
        );

        reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .redirect(redirect_policy(&self.options))
            .build()
            .map_err(FetchError::ClientBuildError)
    }
}

/// Follow redirects only to targets that pass the same URL checks as the
/// original request
fn redirect_policy(options: &FetchOptions) -> Policy {
    let options = options.clone();
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        let verdict = validate_url(attempt.url().as_str(), &options);
        match verdict {
            Ok(_) => attempt.follow(),
            Err(e) => {
                warn!(url = %attempt.url(), error = %e, "Redirect target rejected");
                attempt.error(e)
            }
        }
    })
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let parsed = validate_url(url, &self.options)?;
        let timeout = self.options.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let max_body_bytes = self.options.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES);
        let deadline = Instant::now() + timeout;

        let client = self.build_client()?;

        debug!(url = %parsed, "Fetching document");
        let response = tokio::time::timeout_at(deadline, client.get(parsed).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "Non-success status");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let headers = response.headers();
        if let Some(ct) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            if is_binary_content_type(ct) {
                return Err(FetchError::UnsupportedContent(ct.to_string()));
            }
        }

        let content_length: Option<u64> = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        if content_length.is_some_and(|len| len > max_body_bytes as u64) {
            return Err(FetchError::BodyTooLarge(max_body_bytes));
        }

        let body = read_body(response, max_body_bytes, deadline).await?;
        debug!(url, size = body.len(), "Fetched document");

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Check if content type indicates binary content
fn is_binary_content_type(content_type: &str) -> bool {
    let ct_lower = content_type.to_lowercase();
    BINARY_PREFIXES
        .iter()
        .any(|prefix| ct_lower.starts_with(prefix))
}

/// Read the response body, failing once it passes `max_bytes` or `deadline`
async fn read_body(
    response: reqwest::Response,
    max_bytes: usize,
    deadline: Instant,
) -> Result<Bytes, FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    loop {
        tokio::select! {
            chunk = stream.next() => {
                match chunk {
                    Some(Ok(bytes)) => {
                        if body.len() + bytes.len() > max_bytes {
                            warn!(max_bytes, "Body size cap reached");
                            return Err(FetchError::BodyTooLarge(max_bytes));
                        }
                        body.extend_from_slice(&bytes);
                    }
                    Some(Err(e)) => {
                        error!("Error reading body chunk: {}", e);
                        return Err(FetchError::from_reqwest(e));
                    }
                    None => return Ok(Bytes::from(body)),
                }
            }
            _ = tokio::time::sleep_until(deadline) => {
                warn!("Body timeout reached");
                return Err(FetchError::Timeout);
            }
        }
    }
}

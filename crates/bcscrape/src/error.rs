//! Error types for bcscrape

use thiserror::Error;

/// Errors that can occur while fetching a page
///
/// Every variant is a fetch failure. A selector that matches nothing is not an
/// error: the corresponding field simply keeps its empty default.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL could not be parsed or has a scheme other than http/https
    #[error("Invalid URL: must be an absolute http:// or https:// URL")]
    InvalidUrl,

    /// URL is blocked by prefix list
    #[error("Blocked URL: prefix not allowed")]
    BlockedUrl,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request or body read exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    /// Response is not a document (image, audio, archive, ...)
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),

    /// Response body exceeded the configured size cap
    #[error("Response body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_redirect() {
            if let Some(rejected) = redirect_rejection(&err) {
                return rejected;
            }
        }
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectError(err)
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}

/// URL check failure raised by the redirect policy, if that stopped `err`
fn redirect_rejection(err: &reqwest::Error) -> Option<FetchError> {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        match cause.downcast_ref::<FetchError>() {
            Some(FetchError::BlockedUrl) => return Some(FetchError::BlockedUrl),
            Some(FetchError::InvalidUrl) => return Some(FetchError::InvalidUrl),
            _ => source = cause.source(),
        }
    }
    None
}

use std::error::Error as StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Base URL should not be empty")]
    EmptyBaseUrl,
}

/// Per-page fetch failure. Every variant is recovered at single-page
/// granularity: the traversal engine turns it into one diagnostic line
/// (the `Display` text, prefixed with the address) and moves on.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unknown host.")]
    HostNotFound,

    #[error("read timeout.")]
    Timeout,

    #[error("not a valid url.")]
    MalformedUrl,

    #[error("HTTP error fetching URL")]
    HttpStatus(u16),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus(status) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout;
        }
        if let Some(status) = err.status() {
            return FetchError::HttpStatus(status.as_u16());
        }
        if err.is_builder() || has_url_parse_cause(&err) {
            return FetchError::MalformedUrl;
        }
        if err.is_connect() && is_dns_failure(&err) {
            return FetchError::HostNotFound;
        }
        FetchError::Other(root_cause_text(&err))
    }
}

fn has_url_parse_cause(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.downcast_ref::<url::ParseError>().is_some() {
            return true;
        }
        source = cause.source();
    }
    false
}

// hyper-util reports resolution failures as "dns error: failed to lookup
// address information: ..." somewhere down the source chain.
fn is_dns_failure(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return true;
        }
        source = cause.source();
    }
    false
}

fn root_cause_text(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text = cause.to_string();
        source = cause.source();
    }
    text
}

// src/error.rs
// =============================================================================
// Error types used across the crate.
//
// Each concern gets its own enum so callers can tell what went wrong:
// - ConfigError: bad user input, rejected before any crawling starts
// - FetchError:  a single page could not be fetched (never fatal to a crawl)
// - CrawlError:  the crawler itself could not be built
// - EmitError:   the sitemap could not be serialized or written
//
// main.rs wraps all of these in anyhow::Error for reporting.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Invalid caller input. Checked before the crawler is invoked.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Please enter a website URL")]
    EmptySeed,

    #[error("Invalid URL '{input}': {source}")]
    InvalidSeed {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL has no network location: {0}")]
    MissingHost(String),

    #[error("Max pages must be a positive integer")]
    ZeroMaxPages,

    #[error("Fetch timeout must be greater than zero")]
    ZeroTimeout,
}

/// Why a single page fetch failed.
///
/// The Display output becomes the `<reason>` part of a
/// `link ERROR: <url> - <reason>` progress line.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Status Code: {}", .0.as_u16())]
    Status(StatusCode),

    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("{0}")]
    Request(#[source] reqwest::Error),
}

impl FetchError {
    // Sorts a reqwest error into the variant that best describes it
    pub fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            FetchError::Timeout(timeout)
        } else if error.is_connect() {
            FetchError::Connect(error)
        } else {
            FetchError::Request(error)
        }
    }
}

/// The crawler could not be constructed.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("HTTP client initialization error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// The sitemap could not be produced.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Failed to serialize sitemap: {0}")]
    Serialize(String),

    #[error("Failed to write sitemap to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Status Code: 404");
    }

    #[test]
    fn test_timeout_error_message() {
        let err = FetchError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "request timed out after 10s");
    }

    #[test]
    fn test_write_error_keeps_source() {
        use std::error::Error as _;

        let err = EmitError::Write {
            path: PathBuf::from("/nope/sitemap.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir"),
        };
        assert!(err.to_string().contains("/nope/sitemap.xml"));
        assert!(err.source().is_some());
    }
}

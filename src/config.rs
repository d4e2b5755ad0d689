// src/config.rs
// =============================================================================
// Crawl configuration and seed URL validation.
//
// Everything here runs BEFORE the crawler starts. Bad input (an empty URL,
// a URL without a host, a page limit of 0) is rejected with a ConfigError,
// so the crawler itself can assume it was given sane values.
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Default upper bound on the number of pages in a sitemap
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum number of records produced (failed fetches don't count)
    pub max_pages: usize,
    /// Timeout applied to each individual fetch
    pub fetch_timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Record `<img src>` URLs on each page for image sitemap entries
    pub collect_images: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            collect_images: false,
        }
    }
}

impl CrawlConfig {
    /// Checks the values a crawl cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pages == 0 {
            return Err(ConfigError::ZeroMaxPages);
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

// Parses and validates the seed URL typed by the user
//
// The URL must be absolute and have a network location (host), because
// that host is what keeps the crawl on one site.
//
// Examples:
//   "https://example.com"  -> Ok(https://example.com/)
//   "  https://a.test/x "  -> Ok(https://a.test/x)   (whitespace trimmed)
//   ""                     -> Err(EmptySeed)
//   "example.com"          -> Err(InvalidSeed)      (no scheme)
//   "mailto:me@a.test"     -> Err(MissingHost)
pub fn parse_seed(input: &str) -> Result<Url, ConfigError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptySeed);
    }

    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidSeed {
        input: trimmed.to_string(),
        source,
    })?;

    if url.host_str().is_none() {
        return Err(ConfigError::MissingHost(trimmed.to_string()));
    }

    Ok(url)
}

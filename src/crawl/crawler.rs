// src/crawl/crawler.rs
// =============================================================================
// Breadth-first crawl of one website, producing one PageRecord per page.
//
// How it works:
// 1. Put the seed URL (fragment removed) in the frontier
// 2. Take the oldest URL from the frontier (FIFO = breadth-first order)
// 3. Skip it if it looks like an image or was already visited
// 4. Fetch it; on failure report a "link ERROR" line and move on
// 5. On success build a PageRecord and report a "link OK" line
// 6. Queue every same-site, non-image link not seen before
// 7. Repeat until the frontier is empty, max_pages records exist, or the
//    cancel signal is set
//
// Fetches run one at a time. That keeps the output order deterministic and
// means the frontier and results need no locking.
// =============================================================================

use reqwest::header::LAST_MODIFIED;
use reqwest::{Client, StatusCode};
use url::Url;

use super::cancel::CancelSignal;
use super::frontier::Frontier;
use super::html::extract_page_links;
use super::progress::ProgressSink;
use super::urls::{is_image_url, strip_fragment, NetworkLocation};
use crate::config::CrawlConfig;
use crate::error::{CrawlError, FetchError};
use crate::record::{self, PageRecord};

/// Records from one crawl, in the order their pages were fetched
#[derive(Debug, Default)]
pub struct CrawlResult {
    pub records: Vec<PageRecord>,
    /// True when the crawl stopped because the cancel signal was set
    pub cancelled: bool,
}

impl CrawlResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// A successfully fetched page
struct FetchedPage {
    body: String,
    last_modified: Option<String>,
}

pub struct Crawler {
    client: Client,
    config: CrawlConfig,
}

impl Crawler {
    // Creates a crawler with an HTTP client built from the config
    //
    // The client is reused for every request (connection pooling) and
    // applies config.fetch_timeout to each one.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls the site behind `seed`.
    ///
    /// Never fails: pages that can't be fetched are reported through
    /// `progress` and skipped. If `cancel` is set, the records collected so
    /// far are returned with `cancelled = true`.
    pub async fn crawl(
        &self,
        seed: &Url,
        progress: &ProgressSink,
        cancel: &CancelSignal,
    ) -> CrawlResult {
        let seed = strip_fragment(seed);
        let seed_str = seed.to_string();
        let site = NetworkLocation::of(&seed);

        log::info!(
            "Crawling {} (max {} pages)",
            seed_str,
            self.config.max_pages
        );

        let mut frontier = Frontier::new(seed_str.clone());
        let mut result = CrawlResult::default();

        while !frontier.is_empty() && result.records.len() < self.config.max_pages {
            // Stop early if asked to, keeping what we have
            if cancel.is_cancelled() {
                log::info!("Crawl cancelled with {} page(s) collected", result.len());
                result.cancelled = true;
                break;
            }

            // Take the oldest URL from the queue
            let Some(next) = frontier.next() else {
                break;
            };
            let current = match Url::parse(&next) {
                Ok(url) => strip_fragment(&url),
                Err(e) => {
                    log::debug!("Dropping unparsable queued URL {}: {}", next, e);
                    continue;
                }
            };
            let current_str = current.to_string();

            // Images are never fetched as pages
            if is_image_url(&current_str) {
                log::debug!("Skipping image {}", current_str);
                continue;
            }
            // Re-check against the visited set; try_enqueue already keeps
            // duplicates out of the queue
            if frontier.is_visited(&current_str) {
                continue;
            }

            // Fetch the page, report and skip it on failure
            let page = match self.fetch_page(&current).await {
                Ok(page) => page,
                Err(e) => {
                    log::debug!("Failed to fetch {}: {}", current_str, e);
                    progress.failed(&current_str, &e);
                    continue;
                }
            };

            let found = extract_page_links(&page.body, &current, self.config.collect_images);

            // Mark as visited
            frontier.mark_visited(&current_str);

            // Store the result
            let images = found.images.iter().map(ToString::to_string).collect();
            let record = PageRecord::new(
                current_str.clone(),
                &seed_str,
                page.last_modified.as_deref(),
                record::today(),
            )
            .with_images(images);
            result.records.push(record);
            progress.fetched(&current_str);

            // Queue new links that stay on this site
            for link in found.links {
                let in_scope = site.as_ref().is_some_and(|site| site.contains(&link));
                if !in_scope {
                    continue;
                }
                let link = link.to_string();
                if is_image_url(&link) {
                    continue;
                }
                // Returns false for anything queued or fetched before
                if frontier.try_enqueue(link.clone()) {
                    log::debug!("Queued {}", link);
                }
            }
        }

        log::info!(
            "Crawl finished: {} page(s), {} URL(s) left in queue",
            result.len(),
            frontier.len()
        );

        result
    }

    // Fetches a page and returns its body plus the raw Last-Modified header
    //
    // Anything other than 200 OK (after redirects) counts as a failure.
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let timeout = self.config.fetch_timeout;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        Ok(FetchedPage {
            body,
            last_modified,
        })
    }
}

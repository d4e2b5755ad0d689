// src/crawl/html.rs
// =============================================================================
// Pulls links and images out of a fetched HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Every URL found is resolved against the page URL and has its fragment
// removed. Deciding which links to actually follow (same site, not an image,
// not seen before) is the crawler's job, not ours.
//
// Note: scraper::Html is not Send, so parsing happens in this plain (non-async)
// function and only owned Urls come back out. That keeps the crawl future
// Send, which tokio::spawn requires.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use super::urls::{resolve_link, strip_fragment};

/// Everything the crawler needs from one page's HTML
#[derive(Debug, Default)]
pub struct PageLinks {
    /// `<a href>` targets in document order (duplicates kept)
    pub links: Vec<Url>,
    /// `<img src>` targets in document order, without duplicates
    pub images: Vec<Url>,
}

// Parses HTML and extracts link and image targets
//
// Parameters:
//   html:           the page body
//   page_url:       the URL the page was fetched from (base for relative links)
//   collect_images: whether to look at <img> tags at all
pub fn extract_page_links(html: &str, page_url: &Url, collect_images: bool) -> PageLinks {
    let document = Html::parse_document(html);

    // Constant selectors, known to be valid
    let anchor_selector = Selector::parse("a[href]").expect("valid anchor selector");
    let image_selector = Selector::parse("img[src]").expect("valid image selector");

    // Find all <a href="..."> elements and resolve each target
    let links = document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(page_url, href))
        .map(|url| strip_fragment(&url))
        .collect();

    let mut images: Vec<Url> = Vec::new();
    if collect_images {
        for src in document
            .select(&image_selector)
            .filter_map(|element| element.value().attr("src"))
        {
            if let Some(url) = resolve_link(page_url, src).map(|u| strip_fragment(&u)) {
                // Skip duplicates
                if !images.contains(&url) {
                    images.push(url);
                }
            }
        }
    }

    PageLinks { links, images }
}

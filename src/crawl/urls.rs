// src/crawl/urls.rs
// =============================================================================
// Small URL helpers shared by the crawler and the HTML extractor.
//
// - strip_fragment:  "https://a.test/page#intro" -> "https://a.test/page"
// - is_image_url:    true for .png/.jpg/... (those are never fetched as pages)
// - NetworkLocation: host + port, used to keep the crawl on one site
// - resolve_link:    turns an href into an absolute URL
// =============================================================================

use url::Url;

/// Extensions that mark a URL as an image rather than a page
const IMAGE_EXTENSIONS: [&str; 7] = [".png", ".jpg", ".jpeg", ".webp", ".gif", ".bmp", ".svg"];

/// Removes the `#...` part of a URL
pub fn strip_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}

// Checks whether a URL points at an image
//
// This is a plain case-insensitive suffix check on the URL string, so a
// query string after the extension ("photo.jpg?v=2") is NOT recognized.
pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// The part of a URL that decides whether a link stays on the same site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLocation {
    host: String,
    port: Option<u16>,
}

impl NetworkLocation {
    /// Returns None for URLs without a host (mailto:, data:, ...)
    pub fn of(url: &Url) -> Option<Self> {
        Some(Self {
            host: url.host_str()?.to_string(),
            port: url.port(),
        })
    }

    pub fn contains(&self, url: &Url) -> bool {
        url.host_str() == Some(self.host.as_str()) && url.port() == self.port
    }
}

// Resolves a link (possibly relative) against the page it was found on
//
// Examples:
//   base = "https://a.test/docs/page"
//   "/about"          -> https://a.test/about
//   "../other"        -> https://a.test/other
//   "#top"            -> https://a.test/docs/page#top (fragment stripped later)
//   "https://b.test"  -> https://b.test/
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok()
}

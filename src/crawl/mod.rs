// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Stays on the seed's host and port (doesn't crawl external sites)
// - Stops at a maximum number of pages
// - Can be cancelled between fetches
// - Reports one progress line per fetch over a channel
//
// Submodules:
// - crawler:  the crawl loop and HTTP fetching
// - frontier: the FIFO queue plus seen/visited sets
// - html:     link and image extraction
// - urls:     fragment stripping, image detection, same-site checks
// - cancel:   the shared cancellation flag
// - progress: progress events and the channel they travel on
// =============================================================================

mod cancel;
mod crawler;
mod frontier;
mod html;
mod progress;
mod urls;

pub use cancel::{CancelReason, CancelSignal};
pub use crawler::{CrawlResult, Crawler};
pub use progress::{ProgressEvent, ProgressSink};

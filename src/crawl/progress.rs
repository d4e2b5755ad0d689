// src/crawl/progress.rs
// =============================================================================
// Progress reporting from the crawl worker to whoever is watching.
//
// Every fetch attempt produces one ProgressEvent, rendered as either
//   link OK: <url>
//   link ERROR: <url> - <reason>
//
// Events travel over an unbounded tokio channel, so sending never blocks the
// crawl. The receiver drains them whenever it likes and sees them in the
// order they were sent. If the receiver has gone away, events are dropped.
// =============================================================================

use std::fmt;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Fetched { url: String },
    Failed { url: String, reason: String },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Fetched { url } => write!(f, "link OK: {}", url),
            ProgressEvent::Failed { url, reason } => {
                write!(f, "link ERROR: {} - {}", url, reason)
            }
        }
    }
}

/// Sending half held by the crawler
#[derive(Debug, Clone)]
pub struct ProgressSink {
    tx: UnboundedSender<ProgressEvent>,
}

impl ProgressSink {
    /// Creates a connected sink/receiver pair
    pub fn channel() -> (Self, UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn fetched(&self, url: &str) {
        self.send(ProgressEvent::Fetched {
            url: url.to_string(),
        });
    }

    pub fn failed(&self, url: &str, reason: impl fmt::Display) {
        self.send(ProgressEvent::Failed {
            url: url.to_string(),
            reason: reason.to_string(),
        });
    }

    fn send(&self, event: ProgressEvent) {
        // A closed receiver just means nobody is listening anymore
        let _ = self.tx.send(event);
    }
}

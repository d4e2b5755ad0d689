// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: URLs waiting to be fetched, in discovery order.
//
// Two sets back the queue:
// - seen:    every URL that was ever enqueued (queued OR already processed)
// - visited: URLs whose page was fetched and parsed successfully
//
// try_enqueue() consults `seen`, so a URL can only enter the queue once,
// even if its fetch later fails. That is what guarantees no URL is ever
// fetched twice.
//
// Rust concepts:
// - VecDeque: push_back() to enqueue, pop_front() to dequeue (FIFO = BFS)
// - HashSet: O(1) membership checks instead of scanning the queue
// =============================================================================

use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    seen: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding just the seed
    pub fn new(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.try_enqueue(seed);
        frontier
    }

    /// Adds a URL to the tail of the queue.
    ///
    /// Returns false (and does nothing) if the URL was queued or visited before.
    pub fn try_enqueue(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        // Already queued, fetched or failed
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        // Add to the back of the queue
        self.queue.push_back(url);
        true
    }

    /// Takes the earliest-discovered URL
    pub fn next(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

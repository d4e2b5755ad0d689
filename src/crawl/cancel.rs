// src/crawl/cancel.rs
// =============================================================================
// Cooperative cancellation for a running crawl.
//
// The caller keeps one clone of the signal and gives another to the crawl
// worker. The worker checks it before taking each URL off the frontier, so a
// fetch already in progress is allowed to finish (or time out) first.
//
// The signal remembers WHY it was set: the user asked (Ctrl-C) or the time
// limit ran out. Only the first reason sticks; later calls do nothing.
//
// An AtomicU8 is enough here: one side writes, the other side reads, and
// the state only ever moves away from "active" once.
// =============================================================================

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

const ACTIVE: u8 = 0;
const REQUESTED: u8 = 1;
const TIME_LIMIT: u8 = 2;

/// What stopped the crawl early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Someone called cancel() (e.g. Ctrl-C)
    Requested,
    /// The deadline set with cancel_after() elapsed
    TimeLimit,
}

#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    state: Arc<AtomicU8>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Calling it again does nothing.
    pub fn cancel(&self) {
        self.set(REQUESTED);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) != ACTIVE
    }

    /// Why the signal was set, or None if it wasn't
    pub fn reason(&self) -> Option<CancelReason> {
        match self.state.load(Ordering::Acquire) {
            REQUESTED => Some(CancelReason::Requested),
            TIME_LIMIT => Some(CancelReason::TimeLimit),
            _ => None,
        }
    }

    // Cancels automatically once `limit` has elapsed
    //
    // This is how an overall crawl deadline is built: the crawler itself has
    // no deadline, only a per-fetch timeout.
    pub fn cancel_after(&self, limit: Duration) -> JoinHandle<()> {
        let signal = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            log::info!("Time limit of {}s reached, cancelling crawl", limit.as_secs_f64());
            signal.set(TIME_LIMIT);
        })
    }

    // Only the first transition out of ACTIVE wins
    fn set(&self, reason: u8) {
        let _ = self
            .state
            .compare_exchange(ACTIVE, reason, Ordering::AcqRel, Ordering::Acquire);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_uncancelled() {
        let signal = CancelSignal::new();
        assert!(!signal.is_cancelled());
        assert_eq!(signal.reason(), None);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let signal = CancelSignal::new();
        signal.cancel();
        signal.cancel();
        assert!(signal.is_cancelled());
        assert_eq!(signal.reason(), Some(CancelReason::Requested));
    }

    #[test]
    fn test_clones_share_state() {
        let caller = CancelSignal::new();
        let worker = caller.clone();
        caller.cancel();
        assert!(worker.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_after_deadline() {
        let signal = CancelSignal::new();
        signal.cancel_after(Duration::from_millis(10)).await.unwrap();
        assert!(signal.is_cancelled());
        assert_eq!(signal.reason(), Some(CancelReason::TimeLimit));
    }

    #[tokio::test]
    async fn test_first_reason_wins() {
        let signal = CancelSignal::new();
        signal.cancel();
        signal.cancel_after(Duration::from_millis(10)).await.unwrap();
        assert_eq!(signal.reason(), Some(CancelReason::Requested));
    }
}

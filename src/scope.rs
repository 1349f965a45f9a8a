//! Late-response filtering for page views.
//!
//! A view takes a [`Ticket`] before each fetch and applies the result only if
//! the ticket is still current. Starting a newer fetch or closing the scope
//! (view unmounted) makes older tickets stale. Requests themselves are never
//! aborted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
struct ScopeState {
    generation: AtomicU64,
    closed: AtomicBool,
}

#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    state: Arc<ScopeState>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes every ticket handed out so far.
    pub fn begin(&self) -> Ticket {
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            state: self.state.clone(),
            generation,
        }
    }

    pub fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    state: Arc<ScopeState>,
    generation: u64,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        !self.state.closed.load(Ordering::SeqCst)
            && self.state.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Runs `f` only while the ticket is current.
    pub fn apply<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        if self.is_current() {
            Some(f())
        } else {
            tracing::debug!(generation = self.generation, "dropping stale response");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_fetch_supersedes_older() {
        let scope = RequestScope::new();
        let first = scope.begin();
        let second = scope.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(first.apply(|| 1), None);
        assert_eq!(second.apply(|| 2), Some(2));
    }

    #[test]
    fn closing_discards_everything() {
        let scope = RequestScope::new();
        let ticket = scope.begin();
        scope.clone().close();
        assert!(scope.is_closed());
        assert!(!ticket.is_current());
        assert!(!scope.begin().is_current());
    }

    #[tokio::test]
    async fn out_of_order_completion_keeps_latest() {
        let scope = RequestScope::new();
        let mut shown = None;

        let slow = scope.begin();
        let fast = scope.begin();
        fast.apply(|| shown = Some("fast"));
        tokio::task::yield_now().await;
        slow.apply(|| shown = Some("slow"));

        assert_eq!(shown, Some("fast"));
    }
}

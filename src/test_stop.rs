use std::sync::atomic::{AtomicUsize, Ordering};

use enough::{Stop, StopReason};

/// Lets `remaining` checks pass, then reports cancellation.
pub(crate) struct StopAfter {
    remaining: AtomicUsize,
}

impl StopAfter {
    pub(crate) fn new(checks: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl Stop for StopAfter {
    fn check(&self) -> Result<(), StopReason> {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| StopReason::Cancelled)
    }
}

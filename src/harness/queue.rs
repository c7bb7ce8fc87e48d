//! Completion handoff queue
//!
//! Ordered mailbox between the driver and the collector. The driver
//! appends one handle per submission; the collector takes the entire
//! backlog in one swap and resolves it outside the lock, so a slow
//! resolution never blocks the driver's next push.

use crate::client::ResultHandle;
use std::mem;
use std::sync::{Condvar, Mutex, PoisonError};

/// Mailbox of pending completion handles
pub struct CompletionQueue {
    pending: Mutex<Vec<Box<dyn ResultHandle>>>,
    handle_queued: Condvar,
}

impl CompletionQueue {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            handle_queued: Condvar::new(),
        }
    }

    /// Append a handle and wake the collector
    pub fn push(&self, handle: Box<dyn ResultHandle>) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        pending.push(handle);
        self.handle_queued.notify_one();
    }

    /// Block until at least one handle is queued, then take the whole batch
    ///
    /// Swapping the backlog for an empty vector keeps the critical section
    /// to a pointer exchange; callers resolve the returned batch without
    /// holding any lock.
    pub fn drain(&self) -> Vec<Box<dyn ResultHandle>> {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while pending.is_empty() {
            pending = self
                .handle_queued
                .wait(pending)
                .unwrap_or_else(PoisonError::into_inner);
        }
        mem::take(&mut *pending)
    }

    /// Number of handles currently queued
    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CompletionQueue {
    fn default() -> Self {
        Self::new()
    }
}

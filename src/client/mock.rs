//! Mock store client for testing
//!
//! Simulates an asynchronous key-value store without any network or
//! storage. Each submitted operation becomes ready a fixed delay after
//! submission; resolving a handle sleeps out whatever remains of that
//! delay, so several in-flight handles overlap the way remote completions
//! do. The store records every submission and the order handles resolve,
//! which is what the serialization and throttling tests verify against.
//!
//! # Example
//!
//! ```
//! use kvpulse::client::{MessageKind, StoreClient};
//! use kvpulse::client::mock::MockStore;
//! use std::time::Duration;
//!
//! let store = MockStore::new(Duration::from_micros(50));
//! let handle = store.submit(MessageKind::Volatile, "7", b"payload").unwrap();
//! handle.resolve().unwrap();
//! assert_eq!(store.submitted_count(), 1);
//! assert_eq!(store.resolution_order(), vec!["7".to_string()]);
//! ```

use super::{ClientError, MessageKind, ResultHandle, StoreClient};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Record of a submitted operation for test verification
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub kind: MessageKind,
    pub key: String,
    pub value_len: usize,
    pub submitted_at: Instant,
}

/// Simulated asynchronous store
///
/// Operations become ready `delay` after submission. Cloning is cheap and
/// shares the recorded history.
#[derive(Clone)]
pub struct MockStore {
    delay: Duration,
    fail_resolve: Arc<Mutex<bool>>,
    submissions: Arc<Mutex<Vec<SubmissionRecord>>>,
    resolution_order: Arc<Mutex<Vec<String>>>,
}

impl MockStore {
    /// Create a store whose operations complete `delay` after submission
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail_resolve: Arc::new(Mutex::new(false)),
            submissions: Arc::new(Mutex::new(Vec::new())),
            resolution_order: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every subsequent resolution report a failure
    pub fn set_fail_resolve(&self, fail: bool) {
        *self.fail_resolve.lock().unwrap() = fail;
    }

    /// Number of operations submitted so far
    pub fn submitted_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    /// Copy of all submissions, in submission order
    pub fn submissions(&self) -> Vec<SubmissionRecord> {
        self.submissions.lock().unwrap().clone()
    }

    /// Keys in the order their handles resolved
    pub fn resolution_order(&self) -> Vec<String> {
        self.resolution_order.lock().unwrap().clone()
    }

    /// Span from first to last submission, if at least one was made
    pub fn submission_span(&self) -> Option<Duration> {
        let subs = self.submissions.lock().unwrap();
        let first = subs.first()?.submitted_at;
        let last = subs.last()?.submitted_at;
        Some(last.duration_since(first))
    }
}

struct MockHandle {
    key: String,
    ready_at: Instant,
    fail: bool,
    resolution_order: Arc<Mutex<Vec<String>>>,
}

impl ResultHandle for MockHandle {
    fn resolve(self: Box<Self>) -> Result<(), ClientError> {
        let remaining = self.ready_at.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        if self.fail {
            return Err(ClientError::Resolve(format!(
                "simulated failure for key {}",
                self.key
            )));
        }
        self.resolution_order.lock().unwrap().push(self.key);
        Ok(())
    }
}

impl StoreClient for MockStore {
    fn submit(
        &self,
        kind: MessageKind,
        key: &str,
        value: &[u8],
    ) -> Result<Box<dyn ResultHandle>, ClientError> {
        let now = Instant::now();
        self.submissions.lock().unwrap().push(SubmissionRecord {
            kind,
            key: key.to_string(),
            value_len: value.len(),
            submitted_at: now,
        });

        Ok(Box::new(MockHandle {
            key: key.to_string(),
            ready_at: now + self.delay,
            fail: *self.fail_resolve.lock().unwrap(),
            resolution_order: self.resolution_order.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_records_operation() {
        let store = MockStore::new(Duration::ZERO);
        let handle = store
            .submit(MessageKind::Persistent, "3", &[0u8; 128])
            .unwrap();
        handle.resolve().unwrap();

        let subs = store.submissions();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].kind, MessageKind::Persistent);
        assert_eq!(subs[0].key, "3");
        assert_eq!(subs[0].value_len, 128);
    }

    #[test]
    fn test_resolve_waits_out_delay() {
        let delay = Duration::from_millis(20);
        let store = MockStore::new(delay);
        let handle = store.submit(MessageKind::Volatile, "k", b"v").unwrap();

        let start = Instant::now();
        handle.resolve().unwrap();
        assert!(start.elapsed() >= delay);
    }

    #[test]
    fn test_resolution_order_tracking() {
        let store = MockStore::new(Duration::ZERO);
        for key in ["a", "b", "c"] {
            let handle = store.submit(MessageKind::Volatile, key, b"").unwrap();
            handle.resolve().unwrap();
        }
        assert_eq!(store.resolution_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_injected_resolve_failure() {
        let store = MockStore::new(Duration::ZERO);
        store.set_fail_resolve(true);
        let handle = store.submit(MessageKind::Volatile, "k", b"").unwrap();
        let err = handle.resolve().unwrap_err();
        assert!(err.to_string().contains("simulated failure"));
        // Failed resolutions do not appear in the order log
        assert!(store.resolution_order().is_empty());
    }
}

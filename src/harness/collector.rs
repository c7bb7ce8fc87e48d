//! Completion collector
//!
//! Background thread that drains the completion queue in whole batches,
//! resolves each handle synchronously, stamps the receive time, and
//! returns the permit. Runs until it has seen every message of the
//! session, then hands its receive stamps back through the thread join.

use crate::client::ClientError;
use crate::harness::permits::PermitPool;
use crate::harness::queue::CompletionQueue;
use crate::util::time::SessionClock;

/// Resolve completions until `num_messages` have been observed
///
/// Receive stamps are recorded in resolution order, which can differ from
/// send order whenever more than one request is in flight. A failed
/// resolution aborts collection; the remaining handles are dropped
/// unresolved and the error surfaces at the session join.
pub(crate) fn collect(
    num_messages: usize,
    queue: &CompletionQueue,
    permits: &PermitPool,
    clock: &SessionClock,
) -> Result<Vec<u64>, ClientError> {
    let mut recv_us = Vec::with_capacity(num_messages);

    while recv_us.len() < num_messages {
        let batch = queue.drain();
        for handle in batch {
            handle.resolve()?;
            recv_us.push(clock.now_us());
            permits.release();
        }
    }

    Ok(recv_us)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockStore;
    use crate::client::{MessageKind, StoreClient};
    use std::time::Duration;

    #[test]
    fn test_collect_stamps_every_completion() {
        let store = MockStore::new(Duration::ZERO);
        let queue = CompletionQueue::new();
        let permits = PermitPool::unbounded();
        let clock = SessionClock::new();

        for i in 0..5 {
            let handle = store
                .submit(MessageKind::Volatile, &i.to_string(), b"x")
                .unwrap();
            queue.push(handle);
        }

        let recv_us = collect(5, &queue, &permits, &clock).unwrap();
        assert_eq!(recv_us.len(), 5);
        assert!(recv_us.iter().all(|&us| us > 0));
        // Stamps follow resolution order, which is monotone
        assert!(recv_us.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_collect_releases_permits() {
        let store = MockStore::new(Duration::ZERO);
        let queue = CompletionQueue::new();
        let permits = PermitPool::bounded(2);
        let clock = SessionClock::new();

        permits.acquire();
        permits.acquire();
        queue.push(store.submit(MessageKind::Volatile, "a", b"").unwrap());
        queue.push(store.submit(MessageKind::Volatile, "b", b"").unwrap());

        collect(2, &queue, &permits, &clock).unwrap();
        assert_eq!(permits.available(), Some(2));
    }

    #[test]
    fn test_collect_propagates_resolve_failure() {
        let store = MockStore::new(Duration::ZERO);
        store.set_fail_resolve(true);
        let queue = CompletionQueue::new();
        let permits = PermitPool::unbounded();
        let clock = SessionClock::new();

        queue.push(store.submit(MessageKind::Volatile, "a", b"").unwrap());
        let err = collect(1, &queue, &permits, &clock).unwrap_err();
        assert!(matches!(err, ClientError::Resolve(_)));
    }
}

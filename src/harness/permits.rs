//! In-flight permit pool
//!
//! A counting semaphore built from a mutex-guarded counter and a condition
//! variable. The driver takes a permit before each submission and the
//! collector returns one per resolved handle, which caps the number of
//! requests outstanding at any instant.

use std::sync::{Condvar, Mutex, PoisonError};

struct Bounded {
    available: Mutex<usize>,
    capacity: usize,
    slot_freed: Condvar,
}

/// Counting semaphore gating in-flight requests
///
/// A pool created with [`PermitPool::unbounded`] turns `acquire` and
/// `release` into no-ops, so an unthrottled session pays nothing for the
/// shared code path. Wakeups are best-effort: one waiter is notified per
/// release, with no fairness guarantee beyond eventual progress.
pub struct PermitPool {
    inner: Option<Bounded>,
}

impl PermitPool {
    /// Pool holding `capacity` permits
    pub fn bounded(capacity: usize) -> Self {
        Self {
            inner: Some(Bounded {
                available: Mutex::new(capacity),
                capacity,
                slot_freed: Condvar::new(),
            }),
        }
    }

    /// Pool that never throttles
    pub fn unbounded() -> Self {
        Self { inner: None }
    }

    /// Build from a session's pending-op limit (`None` means unlimited)
    pub fn from_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    /// Block until a permit is free, then take it
    ///
    /// The wait loop re-checks the counter on every wakeup, so spurious
    /// wakeups and poisoned locks are absorbed rather than surfaced: no
    /// work has been issued yet, there is nothing to lose by waiting again.
    pub fn acquire(&self) {
        let Some(pool) = &self.inner else { return };
        let mut available = pool
            .available
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while *available == 0 {
            available = pool
                .slot_freed
                .wait(available)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *available -= 1;
    }

    /// Return a permit and wake one waiter
    pub fn release(&self) {
        let Some(pool) = &self.inner else { return };
        let mut available = pool
            .available
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        debug_assert!(*available < pool.capacity, "more releases than acquires");
        *available += 1;
        pool.slot_freed.notify_one();
    }

    /// Current free permit count; `None` for an unbounded pool
    pub fn available(&self) -> Option<usize> {
        self.inner.as_ref().map(|pool| {
            *pool
                .available
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
        })
    }

    /// Configured capacity; `None` for an unbounded pool
    pub fn capacity(&self) -> Option<usize> {
        self.inner.as_ref().map(|pool| pool.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_acquire_decrements() {
        let pool = PermitPool::bounded(3);
        assert_eq!(pool.available(), Some(3));
        pool.acquire();
        assert_eq!(pool.available(), Some(2));
        pool.acquire();
        pool.acquire();
        assert_eq!(pool.available(), Some(0));
    }

    #[test]
    fn test_release_increments_and_caps_hold() {
        let pool = PermitPool::bounded(2);
        pool.acquire();
        pool.release();
        assert_eq!(pool.available(), Some(2));
        assert_eq!(pool.capacity(), Some(2));
    }

    #[test]
    fn test_unbounded_is_noop() {
        let pool = PermitPool::unbounded();
        assert_eq!(pool.available(), None);
        assert_eq!(pool.capacity(), None);
        // Must not block however many times it is called
        for _ in 0..1000 {
            pool.acquire();
        }
        pool.release();
    }

    #[test]
    fn test_from_limit() {
        assert_eq!(PermitPool::from_limit(Some(4)).capacity(), Some(4));
        assert_eq!(PermitPool::from_limit(None).capacity(), None);
    }

    #[test]
    fn test_acquire_blocks_until_release() {
        let pool = Arc::new(PermitPool::bounded(1));
        pool.acquire();

        let p = pool.clone();
        let waiter = thread::spawn(move || {
            p.acquire();
            p.release();
        });

        // Give the waiter time to park, then free the permit
        thread::sleep(Duration::from_millis(20));
        pool.release();
        waiter.join().unwrap();
        assert_eq!(pool.available(), Some(1));
    }

    #[test]
    fn test_invariant_under_random_interleavings() {
        const CAPACITY: usize = 4;
        const THREADS: usize = 8;
        const ROUNDS: usize = 200;

        let pool = Arc::new(PermitPool::bounded(CAPACITY));
        let held = Arc::new(AtomicUsize::new(0));

        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                let pool = pool.clone();
                let held = held.clone();
                thread::spawn(move || {
                    let mut rng = rand::thread_rng();
                    for _ in 0..ROUNDS {
                        pool.acquire();
                        let now_held = held.fetch_add(1, Ordering::SeqCst) + 1;
                        assert!(now_held <= CAPACITY, "window exceeded: {}", now_held);
                        if rng.gen_bool(0.3) {
                            thread::sleep(Duration::from_micros(rng.gen_range(0..50)));
                        }
                        held.fetch_sub(1, Ordering::SeqCst);
                        pool.release();

                        let available = pool.available().unwrap();
                        assert!(available <= CAPACITY);
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(pool.available(), Some(CAPACITY));
    }
}

//! Benchmark harness
//!
//! Two concurrently active roles share two mutex-protected resources. The
//! driver (the calling thread) acquires a permit, stamps the send time,
//! submits, and hands the handle off; the collector (a background thread)
//! drains handed-off handles in batches, resolves them, stamps receive
//! times, and returns permits. No lock is held across a blocking call to
//! the store: the queue is swapped out before resolution and the permit
//! counter is touched only for increment and decrement.
//!
//! # Session lifecycle
//!
//! Configured -> running (both roles active) -> draining (driver done
//! issuing, collector still resolving) -> complete (report available).
//! There is no retry or cancellation: a handle the store never resolves
//! hangs the session, which is the intended behavior for a harness that
//! exists to measure a working system.

pub mod collector;
pub mod driver;
pub mod permits;
pub mod queue;

pub use permits::PermitPool;
pub use queue::CompletionQueue;

use crate::client::StoreClient;
use crate::config::{validator, Session};
use crate::stats::{Ledger, Report};
use crate::util::time::SessionClock;
use crate::Result;
use anyhow::{anyhow, Context};
use std::sync::Arc;
use std::thread;

/// Everything a completed session produces
pub struct SessionOutcome {
    pub report: Report,
    pub ledger: Ledger,
}

/// Run a session and return its report together with the raw ledger
///
/// The session is validated before anything starts. A resolve failure in
/// the collector surfaces here after the driver finishes issuing; a submit
/// failure in the driver surfaces immediately, leaving the collector
/// thread detached on its queue wait (the session cannot complete once a
/// message is lost, so there is nothing left to join for).
pub fn run_session(session: &Session, client: Arc<dyn StoreClient>) -> Result<SessionOutcome> {
    validator::validate_session(session)?;

    let clock = Arc::new(SessionClock::new());
    let permits = Arc::new(PermitPool::from_limit(session.max_pending_ops));
    let queue = Arc::new(CompletionQueue::new());
    let num_messages = session.num_messages;

    let collector_thread = thread::Builder::new()
        .name("kvpulse-collector".to_string())
        .spawn({
            let queue = queue.clone();
            let permits = permits.clone();
            let clock = clock.clone();
            move || collector::collect(num_messages, &queue, &permits, &clock)
        })
        .context("failed to spawn collector thread")?;

    let send_us = driver::drive(session, client.as_ref(), &permits, &queue, &clock)
        .context("driver failed while issuing requests")?;

    let recv_us = collector_thread
        .join()
        .map_err(|_| anyhow!("collector thread panicked"))?
        .context("collector failed while resolving completions")?;

    let ledger = Ledger::new(send_us, recv_us, session.message_size)?;
    let report = Report::from_ledger(&ledger)?;
    Ok(SessionOutcome { report, ledger })
}

/// Run a session and return only the derived report
pub fn run(session: &Session, client: Arc<dyn StoreClient>) -> Result<Report> {
    Ok(run_session(session, client)?.report)
}

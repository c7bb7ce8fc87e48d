//! Benchmark driver
//!
//! Issues the session's requests in sequence on the calling thread. Each
//! iteration takes a permit (the throttling point), stamps the send time,
//! submits, and hands the returned handle to the collector via the queue.
//! The driver never waits for a completion itself; overlap between
//! submission and resolution is what lets the window fill.

use crate::client::{ClientError, StoreClient};
use crate::config::Session;
use crate::harness::permits::PermitPool;
use crate::harness::queue::CompletionQueue;
use crate::util::time::SessionClock;
use crate::workload::KeyGenerator;

/// Issue all of the session's requests, returning the send stamps
///
/// The send stamp is taken after `acquire` returns, so it reflects
/// readiness to send rather than time spent waiting for the window.
pub(crate) fn drive(
    session: &Session,
    client: &dyn StoreClient,
    permits: &PermitPool,
    queue: &CompletionQueue,
    clock: &SessionClock,
) -> Result<Vec<u64>, ClientError> {
    let keys = KeyGenerator::new(session.max_distinct_objects);
    let payload = session.build_payload();
    let mut send_us = Vec::with_capacity(session.num_messages);

    for i in 0..session.num_messages {
        permits.acquire();
        send_us.push(clock.now_us());

        let key = keys.key_for(i);
        let handle = client.submit(session.kind, &key, &payload)?;
        queue.push(handle);
    }

    Ok(send_us)
}

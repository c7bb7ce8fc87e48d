//! Workload generation
//!
//! Keys are drawn from a fixed-size key space by scrambling the message
//! index with an xorshift round seeded from the wall clock, so repeated
//! runs touch the space in a different order while the set of distinct
//! keys stays bounded. Payloads are either all zeros or random-filled.

use rand::RngCore;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default number of distinct keys a session cycles through
pub const DEFAULT_MAX_DISTINCT_OBJECTS: u64 = 4096;

/// Deterministic-per-run key sequence over a bounded key space
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    seed: u64,
    max_distinct: u64,
}

impl KeyGenerator {
    /// Generator over `max_distinct` keys, seeded from the wall clock
    pub fn new(max_distinct: u64) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0x9e37_79b9_7f4a_7c15);
        Self::with_seed(max_distinct, seed)
    }

    /// Generator with an explicit seed, for reproducible runs
    pub fn with_seed(max_distinct: u64, seed: u64) -> Self {
        debug_assert!(max_distinct > 0);
        Self { seed, max_distinct }
    }

    /// Key for message `index`
    pub fn key_for(&self, index: usize) -> String {
        (scramble(index as u64 ^ self.seed) % self.max_distinct).to_string()
    }
}

/// One xorshift round
fn scramble(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

/// Build a message payload of `size` bytes
pub fn build_payload(size: usize, random_fill: bool) -> Vec<u8> {
    let mut payload = vec![0u8; size];
    if random_fill {
        rand::thread_rng().fill_bytes(&mut payload);
    }
    payload
}

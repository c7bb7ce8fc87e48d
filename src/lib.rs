//! KVPulse - Bounded-concurrency benchmark harness for asynchronous key-value stores
//!
//! KVPulse measures the put path of a remote key-value service by issuing a
//! stream of asynchronous requests against a bounded in-flight window and
//! deriving throughput and latency from a per-message timestamp ledger.
//!
//! # Architecture
//!
//! - **PermitPool**: counting semaphore bounding in-flight requests
//! - **Driver**: issues requests in sequence, stamping send times
//! - **Collector**: background thread draining resolved handles
//! - **Report**: throughput and latency distribution from the ledger
//!
//! The remote store itself is an opaque collaborator behind the
//! [`client::StoreClient`] trait; the crate ships a simulated store
//! ([`client::mock::MockStore`]) for self-tests and the CLI binary.

pub mod client;
pub mod config;
pub mod harness;
pub mod output;
pub mod stats;
pub mod util;
pub mod workload;

// Re-export commonly used types
pub use config::Session;
pub use stats::Report;

/// Result type used throughout KVPulse
pub type Result<T> = anyhow::Result<T>;

//! Statistics: the timestamp ledger and the derived report
//!
//! The ledger is the session's raw record: one send stamp per message in
//! send order and one receive stamp per resolution in resolution order.
//! With more than one request in flight the two orders can differ; pairing
//! the i-th send with the i-th resolution still yields a non-negative
//! latency, because at least i+1 sends precede the i+1-th resolution.
//! The report is a pure, idempotent function of a completed ledger.

pub mod histogram;

use crate::Result;
use histogram::LatencyHistogram;
use serde::Serialize;

/// Paired send/receive microsecond stamps for a completed session
#[derive(Debug, Clone)]
pub struct Ledger {
    send_us: Vec<u64>,
    recv_us: Vec<u64>,
    message_size: usize,
}

impl Ledger {
    /// Assemble a ledger, checking both sides cover every message
    pub fn new(send_us: Vec<u64>, recv_us: Vec<u64>, message_size: usize) -> Result<Self> {
        if send_us.is_empty() {
            anyhow::bail!("ledger must cover at least one message");
        }
        if send_us.len() != recv_us.len() {
            anyhow::bail!(
                "ledger mismatch: {} send stamps vs {} receive stamps",
                send_us.len(),
                recv_us.len()
            );
        }
        Ok(Self {
            send_us,
            recv_us,
            message_size,
        })
    }

    pub fn len(&self) -> usize {
        self.send_us.len()
    }

    pub fn is_empty(&self) -> bool {
        self.send_us.is_empty()
    }

    pub fn message_size(&self) -> usize {
        self.message_size
    }

    pub fn send_us(&self) -> &[u64] {
        &self.send_us
    }

    pub fn recv_us(&self) -> &[u64] {
        &self.recv_us
    }

    /// Per-message latencies, i-th send paired with i-th resolution
    pub fn latencies_us(&self) -> impl Iterator<Item = u64> + '_ {
        self.send_us
            .iter()
            .zip(&self.recv_us)
            .map(|(&send, &recv)| recv.saturating_sub(send))
    }
}

/// Derived snapshot of a session's throughput and latency distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub num_messages: usize,
    pub message_size_bytes: usize,
    pub total_bytes: u64,
    /// Wall-clock span from first send to last receive
    pub elapsed_us: u64,
    pub throughput_mib_per_sec: f64,
    pub throughput_ops_per_sec: f64,
    pub mean_latency_us: f64,
    pub latency_stddev_us: f64,
    pub min_latency_us: u64,
    pub max_latency_us: u64,
    pub p50_latency_us: u64,
    pub p95_latency_us: u64,
    pub p99_latency_us: u64,
}

impl Report {
    /// Compute the report from a completed ledger
    ///
    /// Reads the ledger and nothing else; calling it twice on the same
    /// ledger yields identical reports.
    pub fn from_ledger(ledger: &Ledger) -> Result<Report> {
        let n = ledger.len();
        let total_bytes = n as u64 * ledger.message_size() as u64;

        // Sub-microsecond sessions floor to 1us rather than divide by zero
        let elapsed_us = ledger.recv_us()[n - 1]
            .saturating_sub(ledger.send_us()[0])
            .max(1);

        let throughput_mib_per_sec =
            total_bytes as f64 * 1_000_000.0 / (1024.0 * 1024.0) / elapsed_us as f64;
        let throughput_ops_per_sec = n as f64 * 1_000_000.0 / elapsed_us as f64;

        let mut hist = LatencyHistogram::new();
        let mut sum = 0.0;
        let mut min_latency_us = u64::MAX;
        let mut max_latency_us = 0;
        for latency in ledger.latencies_us() {
            sum += latency as f64;
            min_latency_us = min_latency_us.min(latency);
            max_latency_us = max_latency_us.max(latency);
            hist.record(latency);
        }
        let mean_latency_us = sum / n as f64;

        let squared_deviations: f64 = ledger
            .latencies_us()
            .map(|latency| {
                let dev = latency as f64 - mean_latency_us;
                dev * dev
            })
            .sum();
        // Divisor n + 1 kept for parity with the legacy perf reports
        let latency_stddev_us = (squared_deviations / (n as f64 + 1.0)).sqrt();

        Ok(Report {
            num_messages: n,
            message_size_bytes: ledger.message_size(),
            total_bytes,
            elapsed_us,
            throughput_mib_per_sec,
            throughput_ops_per_sec,
            mean_latency_us,
            latency_stddev_us,
            min_latency_us,
            max_latency_us,
            p50_latency_us: hist.value_at_quantile(0.50),
            p95_latency_us: hist.value_at_quantile(0.95),
            p99_latency_us: hist.value_at_quantile(0.99),
        })
    }
}
